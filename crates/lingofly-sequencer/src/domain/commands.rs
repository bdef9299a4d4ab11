//! Commands for the sequencer.

use lingofly_core::audio::PlaybackTicket;
use uuid::Uuid;

/// Command to begin the session at the first line.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Command issued when the user taps the advance control.
#[derive(Debug, Clone)]
pub struct PressControl {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Command issued when the audio service finishes a playback.
#[derive(Debug, Clone)]
pub struct ReportPlaybackFinished {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The ticket the playback was started with.
    pub ticket: PlaybackTicket,
}
