//! Application layer: the account store and the views it hands to front ends.
//!
//! `AccountStore` owns every account and the repository behind them. It runs each request
//! to completion, including the snapshot write, before returning.

pub mod account_store;
pub mod summary;

pub use account_store::{ACCOUNT_NUMBER_SEED, AccountStore, Committed, ProfileChange};
pub use summary::AccountSummary;
