//! Adapters that translate between accounts and their external representations.

pub mod record;
