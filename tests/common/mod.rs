#![allow(dead_code)]

use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::Command;

/// A `ledgerfile` command pointed at `data_file`.
pub fn bank(data_file: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("ledgerfile"));
    cmd.arg("--data-file").arg(data_file);
    cmd
}

/// Opens an account through the CLI and returns the issued account number.
pub fn create_account(data_file: &Path, name: &str, pin: &str, deposit: &str) -> u32 {
    let output = bank(data_file)
        .args(["create", "--name", name, "--address", "1 Main St", "--phone", "555-0100"])
        .args(["--pin", pin, "--confirm-pin", pin, "--deposit", deposit])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "create failed: {output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Your Account Number is: "))
        .and_then(|number| number.trim().parse().ok())
        .expect("account number in output")
}

/// A data file line for an account with no transactions.
pub fn bare_record(number: u32, name: &str, pin: &str) -> String {
    format!("{number}|{name}|addr|phone|{pin}|0|0")
}
