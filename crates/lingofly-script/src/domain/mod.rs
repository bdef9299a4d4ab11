//! Script value types and the store that owns them.

pub mod entry;
pub mod store;
