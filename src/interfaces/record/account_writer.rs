use super::{FIELD_DELIMITER, to_fields};
use crate::domain::account::Account;
use crate::error::{BankError, Result};
use csv::{QuoteStyle, Terminator};
use std::io::Write;

/// Writes accounts as pipe-delimited records, one line each, without quoting.
pub struct AccountRecordWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountRecordWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_account(&mut self, account: &Account) -> Result<()> {
        self.writer.write_record(to_fields(account))?;
        Ok(())
    }

    pub fn write_accounts<'a>(&mut self, accounts: impl IntoIterator<Item = &'a Account>) -> Result<()> {
        for account in accounts {
            self.write_account(account)?;
        }
        Ok(())
    }

    /// Flushes buffered records and hands back the underlying sink.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| BankError::PersistenceFailure(err.into_error()))
    }
}
