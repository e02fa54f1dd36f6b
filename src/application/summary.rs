use crate::domain::account::{Account, Balance, Holder};
use crate::domain::transaction::Transaction;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A read-only view of one account, rendered as the plain-text export via `Display`.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AccountSummary {
    pub account_number: u32,
    pub holder: Holder,
    pub balance: Balance,
    pub transactions: Vec<Transaction>,
}

impl AccountSummary {
    pub fn export_file_name(&self) -> String {
        export_file_name(self.account_number)
    }
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.number(),
            holder: account.holder().clone(),
            balance: account.balance(),
            transactions: account.history().to_vec(),
        }
    }
}

pub fn export_file_name(account_number: u32) -> String {
    format!("account_{account_number}_summary.txt")
}

/// Formats money with exactly two decimal places.
pub fn money(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    format!("${rounded}")
}

/// Writes the transaction table shared by the summary export and the history listing.
pub fn write_history(f: &mut impl fmt::Write, transactions: &[Transaction]) -> fmt::Result {
    if transactions.is_empty() {
        return writeln!(f, "No transactions found.");
    }

    writeln!(f, "{:<16}{:<14}{:<14}Date", "Type", "Amount", "Balance")?;
    writeln!(f, "{}", "-".repeat(68))?;
    for tx in transactions {
        writeln!(
            f,
            "{:<16}{:<14}{:<14}{}",
            tx.kind.label(),
            money(tx.amount.value()),
            money(tx.balance_after.value()),
            tx.timestamp
        )?;
    }
    Ok(())
}

impl fmt::Display for AccountSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BANK MANAGEMENT SYSTEM - ACCOUNT SUMMARY")?;
        writeln!(f, "=========================================")?;
        writeln!(f)?;
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Customer Name: {}", self.holder.name)?;
        writeln!(f, "Address: {}", self.holder.address)?;
        writeln!(f, "Phone Number: {}", self.holder.phone)?;
        writeln!(f, "Current Balance: {}", money(self.balance.value()))?;
        writeln!(f)?;
        writeln!(f, "TRANSACTION HISTORY:")?;
        writeln!(f, "-------------------")?;
        write_history(f, &self.transactions)
    }
}
