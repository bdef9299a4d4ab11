//! Lingofly: Dialogue Sequencer.
//!
//! Walks the script one line at a time: plays each line's audio, moves and
//! turns the plane icon on a logical clock, and only lets the user move on
//! once the line has finished playing.

pub mod application;
pub mod domain;
