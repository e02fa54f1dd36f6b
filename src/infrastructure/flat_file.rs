use crate::config::{StoreConfig, WriteMode};
use crate::domain::account::Account;
use crate::domain::ports::{AccountRepository, LoadedAccounts};
use crate::error::{BankError, Result};
use crate::interfaces::record::{AccountRecordReader, AccountRecordWriter};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Stores all accounts in a single text file, one record per line.
///
/// Every `save` rewrites the whole file. Only one process may use a given file at a time;
/// there is no locking.
#[derive(Debug, Clone)]
pub struct FlatFileRepository {
    path: PathBuf,
    write_mode: WriteMode,
}

impl FlatFileRepository {
    pub fn new(path: impl Into<PathBuf>, write_mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            write_mode,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.data_file.clone(), config.write_mode)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_snapshot<'a, W: Write>(
        sink: W,
        accounts: &mut dyn Iterator<Item = &'a Account>,
    ) -> Result<W> {
        let mut writer = AccountRecordWriter::new(sink);
        writer.write_accounts(accounts)?;
        writer.finish()
    }

    fn save_in_place<'a>(&self, accounts: &mut dyn Iterator<Item = &'a Account>) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut sink = Self::write_snapshot(BufWriter::new(file), accounts)?;
        sink.flush()?;
        Ok(())
    }

    fn save_atomic<'a>(&self, accounts: &mut dyn Iterator<Item = &'a Account>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        let mut sink = Self::write_snapshot(BufWriter::new(tmp), accounts)?;
        sink.flush()?;
        let tmp = sink.into_inner().map_err(|err| err.into_error())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl AccountRepository for FlatFileRepository {
    fn load(&self) -> Result<LoadedAccounts> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No data file at {}, starting empty", self.path.display());
                return Ok(LoadedAccounts::default());
            }
            Err(err) => return Err(err.into()),
        };

        let mut loaded = LoadedAccounts::default();
        for result in AccountRecordReader::new(file).accounts() {
            match result {
                Ok(account) => loaded.accounts.push(account),
                Err(err @ BankError::MalformedRecord { .. }) => {
                    log::warn!("Skipping record in {}: {err}", self.path.display());
                    loaded.rejected.push(err);
                }
                Err(err) => return Err(err),
            }
        }
        log::debug!(
            "Loaded {} accounts from {}",
            loaded.accounts.len(),
            self.path.display()
        );
        Ok(loaded)
    }

    fn save<'a>(&self, accounts: &mut dyn Iterator<Item = &'a Account>) -> Result<()> {
        match self.write_mode {
            WriteMode::InPlace => self.save_in_place(accounts),
            WriteMode::Atomic => self.save_atomic(accounts),
        }
    }
}
