//! Audio playback abstraction.
//!
//! The sequencer treats audio as an opaque service: it asks for a cue to be
//! played and is told, later, that playback finished. Each request carries a
//! [`PlaybackTicket`] so a late completion for a superseded line can be told
//! apart from the one the sequencer is waiting for.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifies one playback request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackTicket(pub u64);

impl std::fmt::Display for PlaybackTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Service that plays dialogue audio.
///
/// Implementations must not block. When playback of `ticket` completes, the
/// host reports it back to the sequencer with that same ticket.
pub trait AudioService: Send + Sync {
    /// Starts playing `cue`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ResourceMissing` if the cue cannot be resolved or
    /// playback cannot be initiated. The sequencer treats any error as an
    /// immediate completion.
    fn play(&self, cue: &str, ticket: PlaybackTicket) -> Result<(), DomainError>;

    /// Stops whatever is playing. A no-op when nothing is.
    fn stop(&self);
}
