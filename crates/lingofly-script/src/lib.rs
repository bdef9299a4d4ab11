//! Lingofly: Script Store.
//!
//! Holds the fixed, linear radio dialogue a session walks through: who is
//! speaking, what they say, which audio cue to play, and how the plane icon
//! moves while the line plays.

pub mod domain;
pub mod scenarios;
