//! Storage adapters implementing the `AccountRepository` port.

pub mod flat_file;
pub mod in_memory;
