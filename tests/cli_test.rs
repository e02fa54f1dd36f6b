mod common;

use assert_cmd::prelude::*;
use common::{bank, create_account};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_cli_end_to_end() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bank_data.txt");

    let number = create_account(&data, "Alice", "1234", "100.00");
    assert_eq!(number, 1001);

    bank(&data)
        .args(["deposit", "--account", "1001", "--pin", "1234", "--amount", "50.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Balance: $150.00"));

    bank(&data)
        .args(["withdraw", "--account", "1001", "--pin", "1234", "--amount", "200.00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds"));

    bank(&data)
        .args(["withdraw", "--account", "1001", "--pin", "1234", "--amount", "150.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Balance: $0.00"));

    bank(&data)
        .args(["history", "--account", "1001", "--pin", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initial Deposit"))
        .stdout(predicate::str::contains("Withdrawal"));

    let contents = std::fs::read_to_string(&data).unwrap();
    assert!(contents.starts_with("1001|Alice|1 Main St|555-0100|1234|0.00|3|"));
}

#[test]
fn test_cli_rejects_wrong_pin_and_unknown_account() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bank_data.txt");
    create_account(&data, "Alice", "1234", "20");

    bank(&data)
        .args(["balance", "--account", "1001", "--pin", "9999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid PIN"));

    bank(&data)
        .args(["balance", "--account", "2002", "--pin", "1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account 2002 not found"));
}

#[test]
fn test_cli_create_enforces_pin_and_minimum_deposit() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bank_data.txt");

    bank(&data)
        .args(["create", "--name", "Bob", "--pin", "1234", "--confirm-pin", "1243", "--deposit", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PINs don't match"));

    bank(&data)
        .args(["create", "--name", "Bob", "--pin", "12", "--confirm-pin", "12", "--deposit", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 4 digits"));

    bank(&data)
        .args(["create", "--name", "Bob", "--pin", "1234", "--confirm-pin", "1234", "--deposit", "9.99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Minimum initial deposit is 10"));

    assert!(!data.exists(), "nothing should have been persisted");
}

#[test]
fn test_cli_modify_and_delete() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bank_data.txt");
    create_account(&data, "Alice", "1234", "20");

    bank(&data)
        .args(["modify", "--account", "1001", "--pin", "1234", "name", "Alice Smith"])
        .assert()
        .success();
    bank(&data)
        .args(["modify", "--account", "1001", "--pin", "1234", "pin"])
        .args(["--new-pin", "4321", "--confirm-pin", "4321"])
        .assert()
        .success();

    bank(&data)
        .args(["balance", "--account", "1001", "--pin", "4321"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer Name: Alice Smith"))
        .stdout(predicate::str::contains("Current Balance: $20.00"));

    bank(&data)
        .args(["delete", "--account", "1001", "--pin", "4321", "--confirm", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));
    bank(&data)
        .args(["delete", "--account", "1001", "--pin", "4321", "--confirm", "DELETE"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&data).unwrap(), "");
}

#[test]
fn test_cli_delete_authenticates_before_confirmation() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bank_data.txt");
    create_account(&data, "Alice", "1234", "20");

    bank(&data)
        .args(["delete", "--account", "1001", "--pin", "9999", "--confirm", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid PIN"));

    bank(&data)
        .args(["delete", "--account", "2002", "--pin", "1234", "--confirm", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account 2002 not found"));

    assert!(std::fs::read_to_string(&data).unwrap().starts_with("1001|Alice|"));
}

#[test]
fn test_cli_export_and_json() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bank_data.txt");
    create_account(&data, "Alice", "1234", "75.5");

    bank(&data)
        .args(["export", "--account", "1001", "--pin", "1234", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("account_1001_summary.txt"));

    let export = std::fs::read_to_string(dir.path().join("account_1001_summary.txt")).unwrap();
    assert!(export.contains("Current Balance: $75.50"));
    assert!(export.contains("TRANSACTION HISTORY:"));

    let output = bank(&data)
        .args(["balance", "--account", "1001", "--pin", "1234", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["account_number"], 1001);
    assert_eq!(json["holder"]["name"], "Alice");
    assert_eq!(json["transactions"][0]["kind"], "InitialDeposit");
    assert!(json.get("pin").is_none());
}

#[test]
fn test_cli_atomic_writes() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("bank_data.txt");

    bank(&data)
        .arg("--atomic-writes")
        .args(["create", "--name", "Alice", "--pin", "1234", "--confirm-pin", "1234", "--deposit", "10"])
        .assert()
        .success();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(std::fs::read_to_string(&data).unwrap().starts_with("1001|Alice|"));
}
