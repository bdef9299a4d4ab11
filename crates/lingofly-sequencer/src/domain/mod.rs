//! Sequencer state machine and the pieces it is built from.

pub mod commands;
pub mod events;
pub mod scheduler;
pub mod sequencer;
pub mod tween;
