//! Pipe-delimited account records, one account per line:
//!
//! ```text
//! accountNumber|customerName|address|phoneNumber|pin|balance|transactionCount|t1|...|tN
//! ```
//!
//! where each `ti` is `type,amount,date,balanceAfter`. Free-text fields are written verbatim;
//! there is no quoting or escaping.

pub mod account_reader;
pub mod account_writer;

use crate::domain::account::{Account, Amount, Balance, Holder};
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::error::{BankError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

pub use account_reader::AccountRecordReader;
pub use account_writer::AccountRecordWriter;

pub const FIELD_DELIMITER: u8 = b'|';
pub const TRANSACTION_DELIMITER: char = ',';
const HEADER_FIELDS: usize = 7;

/// Serializes an account into a single record line without the trailing newline.
pub fn encode_line(account: &Account) -> String {
    to_fields(account).join("|")
}

/// Parses a single record line.
pub fn decode_line(line: &str) -> Result<Account> {
    let reader = AccountRecordReader::new(line.as_bytes());
    reader.accounts().next().unwrap_or_else(|| {
        Err(BankError::MalformedRecord {
            line: 1,
            reason: "empty record".to_string(),
        })
    })
}

pub(crate) fn to_fields(account: &Account) -> Vec<String> {
    let mut fields = Vec::with_capacity(HEADER_FIELDS + account.history().len());
    fields.push(account.number().to_string());
    fields.push(account.customer_name().to_string());
    fields.push(account.address().to_string());
    fields.push(account.phone_number().to_string());
    fields.push(account.pin().to_string());
    fields.push(account.balance().to_string());
    fields.push(account.history().len().to_string());
    fields.extend(account.history().iter().map(|tx| {
        format!(
            "{},{},{},{}",
            tx.kind.label(),
            tx.amount,
            tx.timestamp,
            tx.balance_after
        )
    }));
    fields
}

pub(crate) fn from_fields(fields: &[&str]) -> std::result::Result<Account, String> {
    if fields.len() < HEADER_FIELDS {
        return Err(format!(
            "expected at least {HEADER_FIELDS} fields, found {}",
            fields.len()
        ));
    }

    let number: u32 = fields[0]
        .parse()
        .map_err(|_| format!("invalid account number '{}'", fields[0]))?;
    if number == 0 {
        return Err("account number must be positive".to_string());
    }
    let holder = Holder::new(fields[1], fields[2], fields[3]);
    let pin = fields[4].to_string();
    let balance = Balance::new(parse_decimal("balance", fields[5])?);
    let count: usize = fields[6]
        .parse()
        .map_err(|_| format!("invalid transaction count '{}'", fields[6]))?;

    let entries = &fields[HEADER_FIELDS..];
    if entries.len() != count {
        return Err(format!(
            "transaction count {count} does not match {} stored transactions",
            entries.len()
        ));
    }
    let history = entries
        .iter()
        .map(|entry| parse_transaction(entry))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Account::restore(number, holder, pin, balance, history)
}

fn parse_transaction(entry: &str) -> std::result::Result<Transaction, String> {
    let parts: Vec<&str> = entry.split(TRANSACTION_DELIMITER).collect();
    let [kind, amount, timestamp, balance_after] = parts.as_slice() else {
        return Err(format!("transaction '{entry}' must have 4 parts"));
    };

    let kind = TransactionKind::from_str(kind)?;
    let amount = Amount::new(parse_decimal("amount", amount)?)
        .map_err(|_| format!("transaction amount must be positive in '{entry}'"))?;

    Ok(Transaction {
        kind,
        amount,
        timestamp: timestamp.to_string(),
        balance_after: Balance::new(parse_decimal("balance after", balance_after)?),
    })
}

/// Accepts plain decimals and the exponent form (`1.23457e+06`) that older data files hold
/// for large values.
fn parse_decimal(name: &str, value: &str) -> std::result::Result<Decimal, String> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| format!("invalid {name} '{value}'"))
}
