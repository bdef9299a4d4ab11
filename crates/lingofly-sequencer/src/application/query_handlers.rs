//! Query handlers for the sequencer.
//!
//! Builds the read-only view the render layer draws from.

use lingofly_core::audio::PlaybackTicket;
use lingofly_core::clock::Clock;
use lingofly_core::error::DomainError;
use lingofly_core::geometry::Pose;
use lingofly_script::domain::entry::Speaker;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::sequencer::{Sequencer, SequencerPhase};

/// Which icon the advance control shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Move on to the next line.
    Next,
    /// Dismiss the final line and end the session.
    Finish,
}

/// Read-only view of a running session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Lifecycle phase.
    pub phase: SequencerPhase,
    /// Index of the current line.
    pub cursor: usize,
    /// Number of lines in the script.
    pub entry_count: usize,
    /// Who transmits the current line.
    pub speaker: Speaker,
    /// Display label for the speaker.
    pub speaker_label: &'static str,
    /// Text of the current line.
    pub text: String,
    /// Phonetic reading of the current line.
    pub spoken: Option<String>,
    /// Logical pose of the plane.
    pub pose: Pose,
    /// Pose to draw right now, mid-animation included.
    pub rendered_pose: Pose,
    /// Whether the plane icon is still gliding.
    pub animating: bool,
    /// Whether the advance control is enabled.
    pub advance_enabled: bool,
    /// Which icon the advance control shows.
    pub control: ControlKind,
    /// Ticket the host must report playback completion with.
    pub pending_ticket: Option<PlaybackTicket>,
    /// Visual actions still waiting to fire.
    pub scheduled_actions: usize,
}

/// Builds the view of `sequencer` at the clock's current time.
///
/// # Errors
///
/// Returns `DomainError::IndexOutOfRange` only if the cursor invariant has
/// been broken.
pub fn get_session_view(
    sequencer: &Sequencer,
    clock: &dyn Clock,
) -> Result<SessionView, DomainError> {
    let now = clock.now();
    let entry = sequencer.current_entry()?;
    let control = if sequencer.script().is_last(sequencer.cursor()) {
        ControlKind::Finish
    } else {
        ControlKind::Next
    };

    Ok(SessionView {
        session_id: sequencer.id,
        phase: sequencer.phase(),
        cursor: sequencer.cursor(),
        entry_count: sequencer.script().entry_count(),
        speaker: entry.speaker,
        speaker_label: entry.speaker.label(),
        text: entry.text.clone(),
        spoken: entry.spoken.clone(),
        pose: sequencer.pose(),
        rendered_pose: sequencer.rendered_pose(now),
        animating: sequencer.is_animating(now),
        advance_enabled: sequencer.advance_enabled(),
        control,
        pending_ticket: sequencer.pending_ticket(),
        scheduled_actions: sequencer.scheduled_actions(),
    })
}
