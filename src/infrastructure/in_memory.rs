use crate::domain::account::Account;
use crate::domain::ports::{AccountRepository, LoadedAccounts};
use crate::error::{BankError, Result};
use crate::interfaces::record::{AccountRecordReader, AccountRecordWriter};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// An in-memory repository holding the serialized snapshot as bytes.
///
/// Uses the same record format as the flat file, so it exercises the codec end to end.
/// Clones share the same buffer, which lets tests inspect what a store persisted.
#[derive(Default, Clone)]
pub struct InMemoryRepository {
    contents: Arc<RwLock<Option<Vec<u8>>>>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryRepository {
    /// Creates a new, empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-filled with raw record text.
    pub fn with_contents(text: impl Into<String>) -> Self {
        let repo = Self::default();
        *repo.contents.write().unwrap_or_else(PoisonError::into_inner) = Some(text.into().into_bytes());
        repo
    }

    /// The last saved snapshot as text, if anything was ever stored.
    pub fn contents(&self) -> Option<String> {
        let contents = self.contents.read().unwrap_or_else(PoisonError::into_inner);
        contents
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Makes subsequent saves fail with an I/O error until switched off again.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl AccountRepository for InMemoryRepository {
    fn load(&self) -> Result<LoadedAccounts> {
        let contents = self.contents.read().unwrap_or_else(PoisonError::into_inner);
        let mut loaded = LoadedAccounts::default();
        let Some(bytes) = contents.as_ref() else {
            return Ok(loaded);
        };

        for result in AccountRecordReader::new(bytes.as_slice()).accounts() {
            match result {
                Ok(account) => loaded.accounts.push(account),
                Err(err @ BankError::MalformedRecord { .. }) => {
                    log::warn!("Skipping in-memory record: {err}");
                    loaded.rejected.push(err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(loaded)
    }

    fn save<'a>(&self, accounts: &mut dyn Iterator<Item = &'a Account>) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(io::Error::other("simulated write failure").into());
        }

        let mut writer = AccountRecordWriter::new(Vec::new());
        writer.write_accounts(accounts)?;
        let bytes = writer.finish()?;
        *self.contents.write().unwrap_or_else(PoisonError::into_inner) = Some(bytes);
        Ok(())
    }
}
