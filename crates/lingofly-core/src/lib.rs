//! Lingofly Core: shared domain abstractions.
//!
//! This crate defines the traits and value types that the script store, the
//! sequencer and the host process all depend on. It contains no
//! infrastructure code.

pub mod audio;
pub mod clock;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
