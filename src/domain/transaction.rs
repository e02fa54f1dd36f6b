use super::account::{Amount, Balance};
use chrono::Local;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// `ctime`-style layout used for every recorded transaction, e.g. `Thu Oct 16 09:30:00 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// The label written to the data file.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::InitialDeposit => "Initial Deposit",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Initial Deposit" => Ok(TransactionKind::InitialDeposit),
            "Deposit" => Ok(TransactionKind::Deposit),
            "Withdrawal" => Ok(TransactionKind::Withdrawal),
            other => Err(format!("unknown transaction type '{other}'")),
        }
    }
}

/// A single ledger entry. Owned by its account and never modified after it is recorded.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub timestamp: String,
    pub balance_after: Balance,
}

impl Transaction {
    /// Records a transaction stamped with the current local time.
    pub fn record(kind: TransactionKind, amount: Amount, balance_after: Balance) -> Self {
        Self {
            kind,
            amount,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            balance_after,
        }
    }
}
