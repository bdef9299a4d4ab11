//! Host lifecycle abstraction.

use uuid::Uuid;

/// The environment a session runs in.
///
/// Called once when the user dismisses the final line. What "ending" means
/// (closing a window, exiting the process, shutting down a server) is up to
/// the host.
pub trait SessionHost: Send + Sync {
    /// Signals that the session is over.
    fn end_session(&self, session_id: Uuid);
}
