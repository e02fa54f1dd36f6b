mod common;

use common::bare_record;
use ledgerfile::application::AccountStore;
use ledgerfile::config::{StoreConfig, WriteMode};
use ledgerfile::domain::account::{Account, Holder};
use ledgerfile::domain::ports::AccountRepositoryBox;
use ledgerfile::error::BankError;
use ledgerfile::infrastructure::flat_file::FlatFileRepository;
use rust_decimal_macros::dec;
use std::path::Path;
use tempfile::tempdir;

fn open_store(path: &Path, write_mode: WriteMode) -> AccountStore {
    let config = StoreConfig::new(path).with_write_mode(write_mode);
    let repository: AccountRepositoryBox = Box::new(FlatFileRepository::from_config(&config));
    AccountStore::load(repository).unwrap()
}

#[test]
fn test_reload_yields_identical_accounts() {
    for write_mode in [WriteMode::InPlace, WriteMode::Atomic] {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank_data.txt");

        let mut store = open_store(&path, write_mode);
        for (name, deposit) in [("Alice", dec!(100)), ("Bob", dec!(0)), ("Carol, Jr.", dec!(12.34))] {
            let committed = store
                .create_account(Holder::new(name, "1 Main St", "555-0100"), "1234", deposit)
                .unwrap();
            assert!(committed.is_persisted());
        }
        let _ = store.deposit(1001, "1234", dec!(0.01)).unwrap();
        let _ = store.withdraw(1003, "1234", dec!(2.34)).unwrap();
        let before: Vec<Account> = store.accounts().cloned().collect();

        let reloaded = open_store(&path, write_mode);
        let after: Vec<Account> = reloaded.accounts().cloned().collect();

        assert_eq!(after.len(), 3);
        assert_eq!(after, before);
        assert!(reloaded.skipped_records().is_empty());
    }
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = tempdir().unwrap();
    let store = open_store(&dir.path().join("never_written.txt"), WriteMode::InPlace);

    assert!(store.is_empty());
    assert_eq!(store.next_account_number(), Some(1001));
}

#[test]
fn test_counter_reseeded_after_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bank_data.txt");

    let mut store = open_store(&path, WriteMode::InPlace);
    for _ in 0..3 {
        let _ = store
            .create_account(Holder::new("Alice", "", ""), "1234", dec!(10))
            .unwrap();
    }
    let _ = store.delete(1002, "1234").unwrap();

    let mut reloaded = open_store(&path, WriteMode::InPlace);
    let number = reloaded
        .create_account(Holder::new("Dave", "", ""), "1234", dec!(10))
        .unwrap()
        .into_inner();

    assert_eq!(number, 1004);
    assert!(matches!(reloaded.get(1002), Err(BankError::NotFound(1002))));
}

#[test]
fn test_malformed_lines_skipped_and_dropped_on_next_persist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bank_data.txt");
    std::fs::write(
        &path,
        format!(
            "{}\n1002|Broken|only|five\n{}\n",
            bare_record(1001, "Alice", "1234"),
            bare_record(1003, "Carol", "1111")
        ),
    )
    .unwrap();

    let mut store = open_store(&path, WriteMode::InPlace);
    assert_eq!(store.len(), 2);
    assert!(matches!(
        store.skipped_records(),
        [BankError::MalformedRecord { line: 2, .. }]
    ));

    let _ = store.deposit(1003, "1111", dec!(5)).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(!contents.contains("Broken"));
}

#[test]
fn test_unreadable_storage_fails_load() {
    let dir = tempdir().unwrap();
    // Opening a directory succeeds on Unix but reading from it does not.
    let repository: AccountRepositoryBox =
        Box::new(FlatFileRepository::new(dir.path(), WriteMode::InPlace));

    let result = AccountStore::load(repository);
    assert!(matches!(result, Err(BankError::PersistenceFailure(_))));
}
