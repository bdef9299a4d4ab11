//! Command handlers for the sequencer.
//!
//! Each handler runs one command against the session's sequencer and returns
//! the events it recorded, so the host can forward them to the view.

use lingofly_core::audio::AudioService;
use lingofly_core::clock::Clock;
use lingofly_core::error::DomainError;
use lingofly_core::host::SessionHost;
use tracing::{info, instrument};

use crate::domain::commands::{PressControl, ReportPlaybackFinished, StartSession};
use crate::domain::events::SequencerEvent;
use crate::domain::sequencer::{ControlOutcome, Sequencer};

/// Handles the `StartSession` command: activates the first line.
///
/// # Errors
///
/// Returns `DomainError::AlreadyStarted` or `DomainError::SessionEnded` if the
/// session is past its start.
#[instrument(skip_all, fields(session_id = %sequencer.id, correlation_id = %command.correlation_id))]
pub fn handle_start_session(
    command: &StartSession,
    sequencer: &mut Sequencer,
    clock: &dyn Clock,
    audio: &dyn AudioService,
) -> Result<Vec<SequencerEvent>, DomainError> {
    sequencer.start(clock, audio)?;
    Ok(sequencer.take_uncommitted_events())
}

/// Handles the `PressControl` command: advances, or ends the session from
/// the final line. When the session ends the host is told.
///
/// # Errors
///
/// Returns `DomainError::SessionEnded` if the session already terminated.
#[instrument(skip_all, fields(session_id = %sequencer.id, correlation_id = %command.correlation_id))]
pub fn handle_press_control(
    command: &PressControl,
    sequencer: &mut Sequencer,
    clock: &dyn Clock,
    audio: &dyn AudioService,
    host: &dyn SessionHost,
) -> Result<(ControlOutcome, Vec<SequencerEvent>), DomainError> {
    let outcome = sequencer.press_control(clock, audio)?;
    if outcome == ControlOutcome::Ended {
        info!("signalling host to end the session");
        host.end_session(sequencer.id);
    }
    Ok((outcome, sequencer.take_uncommitted_events()))
}

/// Handles the `ReportPlaybackFinished` command. Stale tickets are accepted
/// and ignored; the returned flag tells whether the control was unlocked.
///
/// # Errors
///
/// Returns `DomainError::SessionEnded` if the session already terminated.
#[instrument(
    skip_all,
    fields(
        session_id = %sequencer.id,
        correlation_id = %command.correlation_id,
        ticket = %command.ticket,
    )
)]
pub fn handle_playback_finished(
    command: &ReportPlaybackFinished,
    sequencer: &mut Sequencer,
    clock: &dyn Clock,
) -> Result<(bool, Vec<SequencerEvent>), DomainError> {
    if sequencer.is_terminated() {
        return Err(DomainError::SessionEnded);
    }
    let unlocked = sequencer.on_audio_playback_finished(command.ticket, clock);
    Ok((unlocked, sequencer.take_uncommitted_events()))
}

/// Fires due visual actions and runs the audio watchdog.
pub fn handle_tick(sequencer: &mut Sequencer, clock: &dyn Clock) -> Vec<SequencerEvent> {
    sequencer.tick(clock);
    sequencer.take_uncommitted_events()
}
