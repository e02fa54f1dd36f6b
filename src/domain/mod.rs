pub mod account;
pub mod pin;
pub mod ports;
pub mod transaction;
