//! Lingofly API: HTTP host for a single dialogue session.
//!
//! The view layer (a mobile or web client) reads the session view, presses
//! the advance control and reports when it finished playing a line's audio.
//! The server owns the sequencer, drives its clock, and shuts down once the
//! final line is dismissed.

pub mod audio;
pub mod config;
pub mod error;
pub mod host;
pub mod routes;
pub mod state;
