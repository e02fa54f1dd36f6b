use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "bank_data.txt";
pub const DEFAULT_MINIMUM_INITIAL_DEPOSIT: Decimal = Decimal::TEN;

/// How the data file is rewritten after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate the data file and write the snapshot into it. A crash mid-write can leave a
    /// truncated file.
    #[default]
    InPlace,
    /// Write the snapshot to a temporary file next to the data file, then rename it over.
    Atomic,
}

/// Settings for an account store backed by a flat file.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
    pub write_mode: WriteMode,
    /// Smallest opening balance the front end accepts for a new account.
    pub minimum_initial_deposit: Decimal,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            write_mode: WriteMode::default(),
            minimum_initial_deposit: DEFAULT_MINIMUM_INITIAL_DEPOSIT,
        }
    }
}

impl StoreConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn with_minimum_initial_deposit(mut self, minimum: Decimal) -> Self {
        self.minimum_initial_deposit = minimum;
        self
    }

    pub fn check_initial_deposit(&self, amount: Decimal) -> Result<()> {
        if amount < self.minimum_initial_deposit {
            return Err(BankError::BelowMinimumDeposit {
                minimum: self.minimum_initial_deposit,
            });
        }
        Ok(())
    }
}
