use clap::{Args, Parser, Subcommand};
use ledgerfile::application::summary::{money, write_history};
use ledgerfile::application::{AccountStore, Committed, ProfileChange};
use ledgerfile::config::{
    DEFAULT_DATA_FILE, DEFAULT_MINIMUM_INITIAL_DEPOSIT, StoreConfig, WriteMode,
};
use ledgerfile::domain::account::Holder;
use ledgerfile::domain::pin::confirm_pin;
use ledgerfile::domain::ports::AccountRepositoryBox;
use ledgerfile::infrastructure::flat_file::FlatFileRepository;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the account data file
    #[arg(long, global = true, default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Write to a temporary file and rename it over the data file
    #[arg(long, global = true)]
    atomic_writes: bool,

    /// Smallest opening deposit accepted by `create`
    #[arg(long, global = true, default_value_t = DEFAULT_MINIMUM_INITIAL_DEPOSIT)]
    min_deposit: Decimal,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Credentials {
    /// Account number
    #[arg(long)]
    account: u32,

    /// 4-digit PIN
    #[arg(long)]
    pin: String,
}

#[derive(Subcommand)]
enum Command {
    /// Open a new account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        pin: String,
        #[arg(long)]
        confirm_pin: String,
        /// Opening deposit
        #[arg(long)]
        deposit: Decimal,
    },
    /// Deposit funds
    Deposit {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        amount: Decimal,
    },
    /// Withdraw funds
    Withdraw {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        amount: Decimal,
    },
    /// Show account details and balance
    Balance {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        json: bool,
    },
    /// Show the transaction history
    History {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        json: bool,
    },
    /// Change one profile field
    Modify {
        #[command(flatten)]
        credentials: Credentials,
        #[command(subcommand)]
        field: Field,
    },
    /// Delete an account permanently
    Delete {
        #[command(flatten)]
        credentials: Credentials,
        /// Must be the word DELETE
        #[arg(long)]
        confirm: String,
    },
    /// Write the account summary to account_<number>_summary.txt
    Export {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum Field {
    /// Change the customer name
    Name { value: String },
    /// Change the address
    Address { value: String },
    /// Change the phone number
    Phone { value: String },
    /// Change the PIN
    Pin {
        #[arg(long)]
        new_pin: String,
        #[arg(long)]
        confirm_pin: String,
    },
}

impl From<Field> for ProfileChange {
    fn from(field: Field) -> Self {
        match field {
            Field::Name { value } => ProfileChange::Name(value),
            Field::Address { value } => ProfileChange::Address(value),
            Field::Phone { value } => ProfileChange::Phone(value),
            Field::Pin {
                new_pin,
                confirm_pin,
            } => ProfileChange::Pin {
                new: new_pin,
                confirmation: confirm_pin,
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let write_mode = if cli.atomic_writes {
        WriteMode::Atomic
    } else {
        WriteMode::InPlace
    };
    let config = StoreConfig::new(cli.data_file)
        .with_write_mode(write_mode)
        .with_minimum_initial_deposit(cli.min_deposit);

    let repository: AccountRepositoryBox = Box::new(FlatFileRepository::from_config(&config));
    let mut store = AccountStore::load(repository).into_diagnostic()?;

    match cli.command {
        Command::Create {
            name,
            address,
            phone,
            pin,
            confirm_pin: confirmation,
            deposit,
        } => {
            confirm_pin(&pin, &confirmation).into_diagnostic()?;
            config.check_initial_deposit(deposit).into_diagnostic()?;
            let committed = store
                .create_account(Holder::new(name, address, phone), &pin, deposit)
                .into_diagnostic()?;
            let number = report(committed);
            println!("Account created successfully!");
            println!("Your Account Number is: {number}");
        }
        Command::Deposit {
            credentials,
            amount,
        } => {
            let committed = store
                .deposit(credentials.account, &credentials.pin, amount)
                .into_diagnostic()?;
            let balance = report(committed);
            println!("Deposit successful! New Balance: {}", money(balance.value()));
        }
        Command::Withdraw {
            credentials,
            amount,
        } => {
            let committed = store
                .withdraw(credentials.account, &credentials.pin, amount)
                .into_diagnostic()?;
            let balance = report(committed);
            println!("Withdrawal successful! New Balance: {}", money(balance.value()));
        }
        Command::Balance { credentials, json } => {
            let summary = store
                .summary(credentials.account, &credentials.pin)
                .into_diagnostic()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary).into_diagnostic()?);
            } else {
                println!("Account Number: {}", summary.account_number);
                println!("Customer Name: {}", summary.holder.name);
                println!("Address: {}", summary.holder.address);
                println!("Phone Number: {}", summary.holder.phone);
                println!("Current Balance: {}", money(summary.balance.value()));
            }
        }
        Command::History { credentials, json } => {
            let history = store
                .history(credentials.account, &credentials.pin)
                .into_diagnostic()?;
            if json {
                println!("{}", serde_json::to_string_pretty(history).into_diagnostic()?);
            } else {
                let mut table = String::new();
                write_history(&mut table, history).into_diagnostic()?;
                print!("{table}");
            }
        }
        Command::Modify { credentials, field } => {
            let committed = store
                .modify(credentials.account, &credentials.pin, field.into())
                .into_diagnostic()?;
            report(committed);
            println!("Account {} updated successfully!", credentials.account);
        }
        Command::Delete {
            credentials,
            confirm,
        } => {
            store
                .authenticate(credentials.account, &credentials.pin)
                .into_diagnostic()?;
            if confirm != "DELETE" {
                println!("Account deletion cancelled.");
                return Ok(());
            }
            let committed = store
                .delete(credentials.account, &credentials.pin)
                .into_diagnostic()?;
            let account = report(committed);
            println!("Account {} deleted successfully!", account.number());
        }
        Command::Export { credentials, dir } => {
            let path = store
                .export_summary(credentials.account, &credentials.pin, &dir)
                .into_diagnostic()?;
            println!("Account summary exported to: {}", path.display());
        }
    }

    Ok(())
}

/// Prints the persistence warning, if any, and unwraps the committed value.
fn report<T>(committed: Committed<T>) -> T {
    if let Some(err) = &committed.persist_error {
        eprintln!("Warning: Could not save data to file: {err}");
    }
    committed.into_inner()
}
