//! Test audio services: mock `AudioService` implementations for tests.

use std::sync::Mutex;

use lingofly_core::audio::{AudioService, PlaybackTicket};
use lingofly_core::error::DomainError;

/// An audio service that records every `play` and `stop` call and always
/// accepts playback. Completion is never reported on its own; tests report it
/// through the sequencer with the recorded ticket.
#[derive(Debug, Default)]
pub struct RecordingAudioService {
    played: Mutex<Vec<(String, PlaybackTicket)>>,
    stops: Mutex<usize>,
}

impl RecordingAudioService {
    /// Create a service that has played nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all `(cue, ticket)` pairs played, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn played(&self) -> Vec<(String, PlaybackTicket)> {
        self.played.lock().unwrap().clone()
    }

    /// Ticket of the most recent `play` call, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_ticket(&self) -> Option<PlaybackTicket> {
        self.played.lock().unwrap().last().map(|(_, ticket)| *ticket)
    }

    /// Number of `stop` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stop_count(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

impl AudioService for RecordingAudioService {
    fn play(&self, cue: &str, ticket: PlaybackTicket) -> Result<(), DomainError> {
        self.played.lock().unwrap().push((cue.to_owned(), ticket));
        Ok(())
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

/// An audio service that cannot resolve any cue. Useful for testing the
/// fail-open path.
#[derive(Debug)]
pub struct FailingAudioService;

impl AudioService for FailingAudioService {
    fn play(&self, cue: &str, _ticket: PlaybackTicket) -> Result<(), DomainError> {
        Err(DomainError::ResourceMissing(format!("{cue}.mp3")))
    }

    fn stop(&self) {}
}
