use super::transaction::{Transaction, TransactionKind};
use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Represents the monetary value held by an account.
///
/// A thin wrapper around `rust_decimal::Decimal`; the owning `Account` keeps it non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Balance(pub Decimal);

/// Represents a strictly positive monetary amount for transactions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BankError::InvalidAmount)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = BankError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Adds `amount`, returning an error rather than exceeding `Decimal::MAX`.
    pub fn checked_add(self, amount: Amount) -> Result<Self> {
        self.0
            .checked_add(amount.0)
            .map(Self)
            .ok_or(BankError::AmountOverflow)
    }

    pub fn checked_sub(self, amount: Amount) -> Result<Self> {
        self.0
            .checked_sub(amount.0)
            .map(Self)
            .ok_or(BankError::AmountOverflow)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identity and contact details of the account holder.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
pub struct Holder {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Holder {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Rejects values the data file cannot represent.
    pub fn validate(&self) -> Result<()> {
        check_free_text("name", &self.name)?;
        check_free_text("address", &self.address)?;
        check_free_text("phone", &self.phone)
    }
}

/// The record format has no escaping, so the field delimiter and line breaks are not storable.
pub fn check_free_text(field: &'static str, value: &str) -> Result<()> {
    if value.contains('|') {
        return Err(BankError::InvalidField {
            field,
            reason: "must not contain '|'",
        });
    }
    if value.contains(['\n', '\r']) {
        return Err(BankError::InvalidField {
            field,
            reason: "must not contain line breaks",
        });
    }
    Ok(())
}

/// A customer's bank account: identity, credential, balance and ledger.
///
/// The balance always equals the `balance_after` of the last transaction (or zero when the
/// history is empty), and the history only ever grows.
#[derive(Debug, PartialEq, Clone)]
pub struct Account {
    number: u32,
    holder: Holder,
    pin: String,
    balance: Balance,
    history: Vec<Transaction>,
}

impl Account {
    /// Opens a new account, recording the opening balance as an initial deposit when positive.
    pub fn open(number: u32, holder: Holder, pin: impl Into<String>, opening: Decimal) -> Result<Self> {
        if opening < Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }

        let mut account = Self {
            number,
            holder,
            pin: pin.into(),
            balance: Balance::ZERO,
            history: Vec::new(),
        };
        if opening > Decimal::ZERO {
            account.record_initial_deposit(Amount(opening))?;
        }
        Ok(account)
    }

    /// Rebuilds an account from persisted parts, checking the ledger invariants.
    pub fn restore(
        number: u32,
        holder: Holder,
        pin: String,
        balance: Balance,
        history: Vec<Transaction>,
    ) -> std::result::Result<Self, String> {
        if balance < Balance::ZERO {
            return Err(format!("negative balance {balance}"));
        }
        let expected = history.last().map_or(Balance::ZERO, |tx| tx.balance_after);
        if balance != expected {
            return Err(format!(
                "balance {balance} does not match last transaction balance {expected}"
            ));
        }

        Ok(Self {
            number,
            holder,
            pin,
            balance,
            history,
        })
    }

    fn record_initial_deposit(&mut self, amount: Amount) -> Result<()> {
        self.balance = self.balance.checked_add(amount)?;
        self.history.push(Transaction::record(
            TransactionKind::InitialDeposit,
            amount,
            self.balance,
        ));
        Ok(())
    }

    /// Deposits funds and returns the new balance.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        self.balance = self.balance.checked_add(amount)?;
        self.history.push(Transaction::record(
            TransactionKind::Deposit,
            amount,
            self.balance,
        ));
        Ok(self.balance)
    }

    /// Withdraws funds if sufficient and returns the new balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        if amount.value() > self.balance.value() {
            return Err(BankError::InsufficientFunds {
                requested: amount.value(),
                available: self.balance.value(),
            });
        }
        self.balance = self.balance.checked_sub(amount)?;
        self.history.push(Transaction::record(
            TransactionKind::Withdrawal,
            amount,
            self.balance,
        ));
        Ok(self.balance)
    }

    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin == pin
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn holder(&self) -> &Holder {
        &self.holder
    }

    pub fn customer_name(&self) -> &str {
        &self.holder.name
    }

    pub fn address(&self) -> &str {
        &self.holder.address
    }

    pub fn phone_number(&self) -> &str {
        &self.holder.phone
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    // Profile changes are not ledger events.

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.holder.name = name.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.holder.address = address.into();
    }

    pub fn set_phone_number(&mut self, phone: impl Into<String>) {
        self.holder.phone = phone.into();
    }

    pub fn set_pin(&mut self, pin: impl Into<String>) {
        self.pin = pin.into();
    }
}
