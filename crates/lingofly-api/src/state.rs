//! Shared application state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lingofly_core::audio::AudioService;
use lingofly_core::clock::Clock;
use lingofly_core::host::SessionHost;
use lingofly_script::scenarios::Scenario;
use lingofly_sequencer::application::command_handlers;
use lingofly_sequencer::domain::events::SequencerEvent;
use lingofly_sequencer::domain::sequencer::Sequencer;

/// The one session this server hosts, plus every event it has recorded.
#[derive(Debug)]
pub struct SessionRuntime {
    /// The sequencer driving the session.
    pub sequencer: Sequencer,
    events: Vec<SequencerEvent>,
}

impl SessionRuntime {
    /// Wraps a sequencer that has recorded nothing yet.
    #[must_use]
    pub fn new(sequencer: Sequencer) -> Self {
        Self {
            sequencer,
            events: Vec::new(),
        }
    }

    /// Appends events returned by a handler to the session log.
    pub fn record(&mut self, events: Vec<SequencerEvent>) {
        self.events.extend(events);
    }

    /// Events with a sequence number greater than `after`, oldest first.
    #[must_use]
    pub fn events_after(&self, after: i64) -> &[SequencerEvent] {
        let start = self
            .events
            .partition_point(|event| event.metadata.sequence_number <= after);
        &self.events[start..]
    }

    /// Fires due actions and runs the audio watchdog, logging whatever that
    /// produced. Returns `false` once the session is over.
    pub fn tick(&mut self, clock: &dyn Clock) -> bool {
        if self.sequencer.is_terminated() {
            return false;
        }
        let events = command_handlers::handle_tick(&mut self.sequencer, clock);
        self.record(events);
        true
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The scenario being flown.
    pub scenario: Arc<Scenario>,
    /// The live session.
    pub session: Arc<Mutex<SessionRuntime>>,
    /// Time source for the sequencer.
    pub clock: Arc<dyn Clock>,
    /// Audio playback.
    pub audio: Arc<dyn AudioService>,
    /// Told when the final line is dismissed.
    pub host: Arc<dyn SessionHost>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        scenario: Arc<Scenario>,
        sequencer: Sequencer,
        clock: Arc<dyn Clock>,
        audio: Arc<dyn AudioService>,
        host: Arc<dyn SessionHost>,
    ) -> Self {
        Self {
            scenario,
            session: Arc::new(Mutex::new(SessionRuntime::new(sequencer))),
            clock,
            audio,
            host,
        }
    }

    /// Locks the session. A panic in another handler does not leave the
    /// sequencer in a torn state, so a poisoned lock is recovered.
    pub fn lock_session(&self) -> MutexGuard<'_, SessionRuntime> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pumps the sequencer clock once. Returns `false` once the session is
    /// over.
    pub fn tick(&self) -> bool {
        self.lock_session().tick(self.clock.as_ref())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("scenario", &self.scenario.title)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
