//! Application-level handlers the host calls into.

pub mod command_handlers;
pub mod query_handlers;
