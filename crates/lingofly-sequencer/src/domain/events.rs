//! Domain events recorded by the sequencer.

use lingofly_core::audio::PlaybackTicket;
use lingofly_core::event::{DomainEvent, EventMetadata};
use lingofly_core::geometry::Pose;
use lingofly_script::domain::entry::Speaker;
use serde::Serialize;

/// Emitted once when the session starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStarted {
    /// Number of lines in the script.
    pub entry_count: usize,
}

/// Emitted when the cursor moves onto a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryActivated {
    /// The new cursor.
    pub index: usize,
    /// Who transmits the line.
    pub speaker: Speaker,
    /// Number of visual actions scheduled for the line.
    pub scheduled_actions: usize,
}

/// Emitted when the audio service is asked to play a line's cue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackRequested {
    /// The line being voiced.
    pub index: usize,
    /// The cue handed to the audio service.
    pub cue: String,
    /// Ticket the completion must be reported with.
    pub ticket: PlaybackTicket,
}

/// Why the advance control became available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockReason {
    /// The audio service reported completion.
    PlaybackFinished,
    /// The line has no audio cue.
    NoAudioCue,
    /// The audio service refused or failed to play the cue.
    PlaybackFailed,
    /// No completion arrived within the audio timeout.
    TimedOut,
}

/// Emitted when the advance control is enabled for a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvanceUnlocked {
    /// The current line.
    pub index: usize,
    /// What unlocked it.
    pub reason: UnlockReason,
}

/// Emitted each time a visual action changes the plane's pose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionApplied {
    /// Line the action belongs to.
    pub entry_index: usize,
    /// Position of the action within its line.
    pub action_index: usize,
    /// Pose after the action.
    pub pose: Pose,
    /// True when the action was applied ahead of its fire time because the
    /// user moved on to the next line.
    pub settled_early: bool,
}

/// Emitted when the user dismisses the final line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionEnded {
    /// The line the session ended on.
    pub final_index: usize,
    /// Scheduled actions discarded at shutdown.
    pub dropped_actions: usize,
}

/// Event payload variants for the sequencer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SequencerEventKind {
    /// The session has started.
    SessionStarted(SessionStarted),
    /// A line became current.
    EntryActivated(EntryActivated),
    /// Audio playback was requested.
    PlaybackRequested(PlaybackRequested),
    /// The advance control was enabled.
    AdvanceUnlocked(AdvanceUnlocked),
    /// A visual action fired.
    ActionApplied(ActionApplied),
    /// The session is over.
    SessionEnded(SessionEnded),
}

impl SequencerEventKind {
    /// Dotted type name used in event metadata and logs.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => "sequencer.session_started",
            Self::EntryActivated(_) => "sequencer.entry_activated",
            Self::PlaybackRequested(_) => "sequencer.playback_requested",
            Self::AdvanceUnlocked(_) => "sequencer.advance_unlocked",
            Self::ActionApplied(_) => "sequencer.action_applied",
            Self::SessionEnded(_) => "sequencer.session_ended",
        }
    }
}

/// Domain event envelope for the sequencer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequencerEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SequencerEventKind,
}

impl DomainEvent for SequencerEvent {
    fn event_type(&self) -> &'static str {
        self.kind.type_name()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Derived Serialize on plain data cannot fail; Null keeps this total.
        serde_json::to_value(&self.kind).unwrap_or_default()
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
