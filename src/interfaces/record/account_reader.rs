use super::{FIELD_DELIMITER, from_fields};
use crate::domain::account::Account;
use crate::error::{BankError, Result};
use std::io::Read;

/// Reads account records from a pipe-delimited source.
///
/// Each line is parsed independently, so a bad line surfaces as a `MalformedRecord` item and
/// the following lines are still read. Read failures of the source itself surface as
/// `PersistenceFailure`.
pub struct AccountRecordReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountRecordReader<R> {
    /// Creates a new `AccountRecordReader` from any `Read` source (e.g., File, byte slice).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and parses accounts.
    pub fn accounts(self) -> impl Iterator<Item = Result<Account>> {
        self.reader.into_records().map(|result| {
            let record = result.map_err(|err| {
                if err.is_io_error() {
                    BankError::from(err)
                } else {
                    BankError::MalformedRecord {
                        line: err.position().map_or(0, |pos| pos.line()),
                        reason: err.to_string(),
                    }
                }
            })?;
            let line = record.position().map_or(0, |pos| pos.line());
            let fields: Vec<&str> = record.iter().collect();
            from_fields(&fields).map_err(|reason| BankError::MalformedRecord { line, reason })
        })
    }
}
