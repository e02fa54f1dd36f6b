use super::summary::{AccountSummary, export_file_name};
use crate::domain::account::{Account, Balance, Holder, check_free_text};
use crate::domain::pin::{confirm_pin, validate_pin};
use crate::domain::ports::{AccountRepository, AccountRepositoryBox};
use crate::domain::transaction::Transaction;
use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Account numbers are issued above this value; the first account gets 1001.
pub const ACCOUNT_NUMBER_SEED: u32 = 1000;

/// A single profile update applied by `AccountStore::modify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChange {
    Name(String),
    Address(String),
    Phone(String),
    Pin { new: String, confirmation: String },
}

/// The outcome of a mutation that has been applied in memory.
///
/// The mutation is kept even when writing the snapshot failed; `persist_error` then carries
/// the `PersistenceFailure` so the caller can warn the user.
#[must_use]
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub persist_error: Option<BankError>,
}

impl<T> Committed<T> {
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// All accounts, keyed by account number, backed by a repository holding full snapshots.
///
/// Every mutation rewrites the whole snapshot before returning, so storage is at most one
/// operation behind memory. Mutations take `&mut self`; the store is meant for a single
/// writer.
pub struct AccountStore<R: AccountRepository = AccountRepositoryBox> {
    accounts: BTreeMap<u32, Account>,
    last_issued: u32,
    skipped: Vec<BankError>,
    repository: R,
}

impl<R: AccountRepository> AccountStore<R> {
    /// Loads every account from `repository` and seeds the account-number counter.
    ///
    /// Malformed records are skipped (see `skipped_records`); only a failure to read the
    /// storage itself is an error.
    pub fn load(repository: R) -> Result<Self> {
        let loaded = repository.load()?;

        let mut accounts = BTreeMap::new();
        for account in loaded.accounts {
            let number = account.number();
            if accounts.insert(number, account).is_some() {
                log::warn!("Account {number} appears more than once, keeping the last record");
            }
        }
        let last_issued = accounts
            .keys()
            .next_back()
            .copied()
            .unwrap_or(ACCOUNT_NUMBER_SEED)
            .max(ACCOUNT_NUMBER_SEED);

        log::debug!(
            "Loaded {} accounts, next account number {}",
            accounts.len(),
            last_issued.saturating_add(1)
        );

        Ok(Self {
            accounts,
            last_issued,
            skipped: loaded.rejected,
            repository,
        })
    }

    /// Records rejected while loading.
    pub fn skipped_records(&self) -> &[BankError] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in ascending account-number order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// The number the next `create_account` call will issue.
    pub fn next_account_number(&self) -> Option<u32> {
        self.last_issued.checked_add(1)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Opens a new account and returns its number.
    ///
    /// The caller is responsible for enforcing any minimum opening deposit.
    pub fn create_account(
        &mut self,
        holder: Holder,
        pin: &str,
        initial_deposit: Decimal,
    ) -> Result<Committed<u32>> {
        holder.validate()?;
        validate_pin(pin)?;
        let number = self
            .next_account_number()
            .ok_or(BankError::AccountNumbersExhausted)?;
        let account = Account::open(number, holder, pin, initial_deposit)?;

        self.last_issued = number;
        self.accounts.insert(number, account);
        log::info!("Created account {number}");
        Ok(self.commit(number))
    }

    pub fn get(&self, number: u32) -> Result<&Account> {
        self.accounts.get(&number).ok_or(BankError::NotFound(number))
    }

    /// Returns the account if it exists and `pin` matches its stored PIN.
    pub fn authenticate(&self, number: u32, pin: &str) -> Result<&Account> {
        let account = self.get(number)?;
        if !account.verify_pin(pin) {
            log::debug!("PIN mismatch for account {number}");
            return Err(BankError::InvalidPin);
        }
        Ok(account)
    }

    fn authenticate_mut(&mut self, number: u32, pin: &str) -> Result<&mut Account> {
        self.authenticate(number, pin)?;
        self.accounts
            .get_mut(&number)
            .ok_or(BankError::NotFound(number))
    }

    pub fn deposit(&mut self, number: u32, pin: &str, amount: Decimal) -> Result<Committed<Balance>> {
        let balance = self.authenticate_mut(number, pin)?.deposit(amount)?;
        log::debug!("Deposited {amount} into account {number}");
        Ok(self.commit(balance))
    }

    pub fn withdraw(&mut self, number: u32, pin: &str, amount: Decimal) -> Result<Committed<Balance>> {
        let balance = self.authenticate_mut(number, pin)?.withdraw(amount)?;
        log::debug!("Withdrew {amount} from account {number}");
        Ok(self.commit(balance))
    }

    pub fn balance(&self, number: u32, pin: &str) -> Result<Balance> {
        Ok(self.authenticate(number, pin)?.balance())
    }

    pub fn history(&self, number: u32, pin: &str) -> Result<&[Transaction]> {
        Ok(self.authenticate(number, pin)?.history())
    }

    pub fn summary(&self, number: u32, pin: &str) -> Result<AccountSummary> {
        Ok(AccountSummary::from(self.authenticate(number, pin)?))
    }

    /// Updates one profile field. PIN changes need a matching confirmation.
    pub fn modify(&mut self, number: u32, pin: &str, change: ProfileChange) -> Result<Committed<()>> {
        match &change {
            ProfileChange::Name(value) => check_free_text("name", value)?,
            ProfileChange::Address(value) => check_free_text("address", value)?,
            ProfileChange::Phone(value) => check_free_text("phone", value)?,
            ProfileChange::Pin { new, confirmation } => confirm_pin(new, confirmation)?,
        }

        let account = self.authenticate_mut(number, pin)?;
        match change {
            ProfileChange::Name(value) => account.set_customer_name(value),
            ProfileChange::Address(value) => account.set_address(value),
            ProfileChange::Phone(value) => account.set_phone_number(value),
            ProfileChange::Pin { new, .. } => account.set_pin(new),
        }
        log::info!("Modified account {number}");
        Ok(self.commit(()))
    }

    /// Removes the account for good and returns it. Its number is never issued again by
    /// this store.
    pub fn delete(&mut self, number: u32, pin: &str) -> Result<Committed<Account>> {
        self.authenticate(number, pin)?;
        let account = self
            .accounts
            .remove(&number)
            .ok_or(BankError::NotFound(number))?;
        log::info!("Deleted account {number}");
        Ok(self.commit(account))
    }

    /// Writes the summary text to `account_<number>_summary.txt` inside `directory`.
    pub fn export_summary(&self, number: u32, pin: &str, directory: &Path) -> Result<PathBuf> {
        let summary = self.summary(number, pin)?;
        let path = directory.join(export_file_name(number));
        std::fs::write(&path, summary.to_string())?;
        log::info!("Exported account {number} to {}", path.display());
        Ok(path)
    }

    /// Replaces the stored snapshot with the current accounts.
    pub fn persist(&self) -> Result<()> {
        self.repository.save(&mut self.accounts.values())
    }

    fn commit<T>(&self, value: T) -> Committed<T> {
        let persist_error = match self.persist() {
            Ok(()) => None,
            Err(err) => {
                log::warn!("Could not save accounts: {err}");
                Some(err)
            }
        };
        Committed {
            value,
            persist_error,
        }
    }
}
