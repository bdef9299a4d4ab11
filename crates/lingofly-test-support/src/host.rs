//! Test host: records lifecycle signals.

use std::sync::Mutex;

use lingofly_core::host::SessionHost;
use uuid::Uuid;

/// A session host that remembers which sessions were ended.
#[derive(Debug, Default)]
pub struct RecordingSessionHost {
    ended: Mutex<Vec<Uuid>>,
}

impl RecordingSessionHost {
    /// Create a host that has seen no sessions end.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session ids passed to `end_session`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn ended_sessions(&self) -> Vec<Uuid> {
        self.ended.lock().unwrap().clone()
    }
}

impl SessionHost for RecordingSessionHost {
    fn end_session(&self, session_id: Uuid) {
        self.ended.lock().unwrap().push(session_id);
    }
}
