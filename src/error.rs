use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Account {0} not found")]
    NotFound(u32),
    #[error("Invalid PIN")]
    InvalidPin,
    #[error("Invalid PIN format: {0}")]
    InvalidPinFormat(String),
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
    #[error("Amount would overflow the account balance")]
    AmountOverflow,
    #[error("Minimum initial deposit is {minimum}")]
    BelowMinimumDeposit { minimum: Decimal },
    #[error("No account numbers left to issue")]
    AccountNumbersExhausted,
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(csv::Error),
}

impl From<csv::Error> for BankError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => BankError::PersistenceFailure(io),
                other => BankError::PersistenceFailure(std::io::Error::other(format!("{other:?}"))),
            }
        } else {
            BankError::CsvError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, BankError>;
