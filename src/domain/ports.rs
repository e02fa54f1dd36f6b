use super::account::Account;
use crate::error::{BankError, Result};

/// Accounts read back from storage, together with the lines that had to be skipped.
#[derive(Debug, Default)]
pub struct LoadedAccounts {
    pub accounts: Vec<Account>,
    pub rejected: Vec<BankError>,
}

/// Durable storage for the full set of accounts.
///
/// Implementations persist complete snapshots: `save` replaces whatever was stored before.
pub trait AccountRepository {
    /// Reads every stored account. Missing storage yields an empty result, not an error.
    fn load(&self) -> Result<LoadedAccounts>;
    /// Replaces the stored snapshot with `accounts`, written in iteration order.
    fn save<'a>(&self, accounts: &mut dyn Iterator<Item = &'a Account>) -> Result<()>;
}

pub type AccountRepositoryBox = Box<dyn AccountRepository>;

impl<R: AccountRepository + ?Sized> AccountRepository for Box<R> {
    fn load(&self) -> Result<LoadedAccounts> {
        (**self).load()
    }

    fn save<'a>(&self, accounts: &mut dyn Iterator<Item = &'a Account>) -> Result<()> {
        (**self).save(accounts)
    }
}
