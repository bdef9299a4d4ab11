//! The dialogue sequencer aggregate.
//!
//! States:
//!
//! ```text
//! NotStarted --start--> AwaitingAudio --playback finished--> ReadyToAdvance
//!                            ^                                   |
//!                            +-------- advance (not last) -------+
//!                                                                |
//!                                   Terminated <-- end (last) ---+
//! ```
//!
//! Audio that cannot be played, lines without a cue, and playback that never
//! reports back all unlock the control anyway: the user is never stranded.

use chrono::{DateTime, TimeDelta, Utc};
use lingofly_core::audio::{AudioService, PlaybackTicket};
use lingofly_core::clock::Clock;
use lingofly_core::error::DomainError;
use lingofly_core::event::EventMetadata;
use lingofly_core::geometry::Pose;
use lingofly_script::domain::entry::{AudioCue, ScriptEntry};
use lingofly_script::domain::store::ScriptStore;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::events::{
    ActionApplied, AdvanceUnlocked, EntryActivated, PlaybackRequested, SequencerEvent,
    SequencerEventKind, SessionEnded, SessionStarted, UnlockReason,
};
use super::scheduler::{ActionScheduler, ScheduledAction};
use super::tween::PlaneMotion;

/// How long to wait for a playback completion before unlocking anyway.
pub const DEFAULT_AUDIO_TIMEOUT_SECS: i64 = 30;

/// Where the sequencer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerPhase {
    /// `start` has not been called.
    NotStarted,
    /// The current line is playing; the advance control is disabled.
    AwaitingAudio,
    /// The current line has played; the advance control is enabled.
    ReadyToAdvance,
    /// The final line was dismissed.
    Terminated,
}

/// Result of an `advance` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The cursor moved to the contained index.
    Advanced(usize),
    /// The control is disabled; nothing changed.
    Locked,
    /// Already on the final line; nothing changed.
    AtFinalEntry,
}

/// Result of an `end_session` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    /// The session is now terminated.
    Ended,
    /// The control is disabled; nothing changed.
    Locked,
    /// Not on the final line; nothing changed.
    NotAtFinalEntry,
}

/// Result of a press on the advance control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "index", rename_all = "snake_case")]
pub enum ControlOutcome {
    /// The cursor moved to the contained index.
    Advanced(usize),
    /// The final line was dismissed and the session ended.
    Ended,
    /// The control is disabled; nothing changed.
    Locked,
}

#[derive(Debug, Clone, Copy)]
struct PendingPlayback {
    ticket: PlaybackTicket,
    started_at: DateTime<Utc>,
}

/// Playback cursor and animated plane state for one session.
#[derive(Debug)]
pub struct Sequencer {
    /// Session identifier.
    pub id: Uuid,
    script: ScriptStore,
    phase: SequencerPhase,
    cursor: usize,
    motion: PlaneMotion,
    scheduler: ActionScheduler,
    pending_playback: Option<PendingPlayback>,
    tickets_issued: u64,
    audio_timeout: TimeDelta,
    /// Number of events recorded so far.
    pub(crate) version: i64,
    uncommitted_events: Vec<SequencerEvent>,
}

impl Sequencer {
    /// Creates a sequencer over `script` with the plane resting at
    /// `initial_pose`.
    #[must_use]
    pub fn new(id: Uuid, script: ScriptStore, initial_pose: Pose) -> Self {
        Self {
            id,
            script,
            phase: SequencerPhase::NotStarted,
            cursor: 0,
            motion: PlaneMotion::new(initial_pose),
            scheduler: ActionScheduler::new(),
            pending_playback: None,
            tickets_issued: 0,
            audio_timeout: TimeDelta::seconds(DEFAULT_AUDIO_TIMEOUT_SECS),
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Replaces the audio watchdog timeout.
    #[must_use]
    pub fn with_audio_timeout(mut self, timeout: TimeDelta) -> Self {
        self.audio_timeout = timeout;
        self
    }

    /// Index of the current line.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SequencerPhase {
        self.phase
    }

    /// Whether the advance control is enabled.
    #[must_use]
    pub fn advance_enabled(&self) -> bool {
        self.phase == SequencerPhase::ReadyToAdvance
    }

    /// Whether the session has ended.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.phase == SequencerPhase::Terminated
    }

    /// The script being played.
    #[must_use]
    pub fn script(&self) -> &ScriptStore {
        &self.script
    }

    /// The current line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IndexOutOfRange` only if the cursor invariant has
    /// been broken.
    pub fn current_entry(&self) -> Result<&ScriptEntry, DomainError> {
        self.script.entry_at(self.cursor)
    }

    /// Logical pose of the plane.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.motion.pose()
    }

    /// Pose the view should draw at `now`, mid-animation included.
    #[must_use]
    pub fn rendered_pose(&self, now: DateTime<Utc>) -> Pose {
        self.motion.rendered(now)
    }

    /// Whether the plane icon is still gliding at `now`.
    #[must_use]
    pub fn is_animating(&self, now: DateTime<Utc>) -> bool {
        self.motion.is_animating(now)
    }

    /// Ticket of the playback being waited on.
    #[must_use]
    pub fn pending_ticket(&self) -> Option<PlaybackTicket> {
        self.pending_playback.map(|p| p.ticket)
    }

    /// Number of visual actions not yet fired.
    #[must_use]
    pub fn scheduled_actions(&self) -> usize {
        self.scheduler.len()
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[SequencerEvent] {
        &self.uncommitted_events
    }

    /// Removes and returns the events recorded since the last drain.
    pub fn take_uncommitted_events(&mut self) -> Vec<SequencerEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    /// Starts the session on the first line: plays its cue and schedules its
    /// actions exactly as `advance` would.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyStarted` if called twice and
    /// `DomainError::SessionEnded` once terminated.
    pub fn start(&mut self, clock: &dyn Clock, audio: &dyn AudioService) -> Result<(), DomainError> {
        match self.phase {
            SequencerPhase::NotStarted => {}
            SequencerPhase::Terminated => return Err(DomainError::SessionEnded),
            SequencerPhase::AwaitingAudio | SequencerPhase::ReadyToAdvance => {
                return Err(DomainError::AlreadyStarted);
            }
        }

        let now = clock.now();
        info!(session_id = %self.id, entries = self.script.entry_count(), "session started");
        self.record(
            now,
            SequencerEventKind::SessionStarted(SessionStarted {
                entry_count: self.script.entry_count(),
            }),
        );
        self.activate(0, now, audio)
    }

    /// Moves to the next line.
    ///
    /// Pending actions of the line being left are applied first, so none of
    /// them can fire once the next line is on screen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionEnded` once terminated.
    pub fn advance(
        &mut self,
        clock: &dyn Clock,
        audio: &dyn AudioService,
    ) -> Result<AdvanceOutcome, DomainError> {
        if self.is_terminated() {
            return Err(DomainError::SessionEnded);
        }
        let now = clock.now();
        self.tick_at(now);

        if !self.advance_enabled() {
            debug!(session_id = %self.id, cursor = self.cursor, "advance ignored while locked");
            return Ok(AdvanceOutcome::Locked);
        }
        if self.script.is_last(self.cursor) {
            return Ok(AdvanceOutcome::AtFinalEntry);
        }

        self.settle(now);
        let next = self.cursor + 1;
        self.activate(next, now, audio)?;
        Ok(AdvanceOutcome::Advanced(next))
    }

    /// Ends the session from the final line.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionEnded` if already terminated.
    pub fn end_session(
        &mut self,
        clock: &dyn Clock,
        audio: &dyn AudioService,
    ) -> Result<EndOutcome, DomainError> {
        if self.is_terminated() {
            return Err(DomainError::SessionEnded);
        }
        let now = clock.now();
        self.tick_at(now);

        if !self.advance_enabled() {
            return Ok(EndOutcome::Locked);
        }
        if !self.script.is_last(self.cursor) {
            return Ok(EndOutcome::NotAtFinalEntry);
        }

        let dropped_actions = self.scheduler.clear();
        audio.stop();
        self.pending_playback = None;
        self.phase = SequencerPhase::Terminated;
        info!(session_id = %self.id, final_index = self.cursor, "session ended");
        self.record(
            now,
            SequencerEventKind::SessionEnded(SessionEnded {
                final_index: self.cursor,
                dropped_actions,
            }),
        );
        Ok(EndOutcome::Ended)
    }

    /// The single advance control: ends the session on the final line and
    /// advances everywhere else.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionEnded` once terminated.
    pub fn press_control(
        &mut self,
        clock: &dyn Clock,
        audio: &dyn AudioService,
    ) -> Result<ControlOutcome, DomainError> {
        if self.is_terminated() {
            return Err(DomainError::SessionEnded);
        }
        if self.script.is_last(self.cursor) {
            return Ok(match self.end_session(clock, audio)? {
                EndOutcome::Ended => ControlOutcome::Ended,
                EndOutcome::Locked | EndOutcome::NotAtFinalEntry => ControlOutcome::Locked,
            });
        }
        Ok(match self.advance(clock, audio)? {
            AdvanceOutcome::Advanced(index) => ControlOutcome::Advanced(index),
            AdvanceOutcome::Locked | AdvanceOutcome::AtFinalEntry => ControlOutcome::Locked,
        })
    }

    /// Reports that playback of `ticket` finished. Returns whether this
    /// unlocked the advance control; stale or repeated tickets are ignored.
    pub fn on_audio_playback_finished(&mut self, ticket: PlaybackTicket, clock: &dyn Clock) -> bool {
        if matches!(
            self.phase,
            SequencerPhase::NotStarted | SequencerPhase::Terminated
        ) {
            return false;
        }
        let now = clock.now();
        self.tick_at(now);

        match self.pending_playback {
            Some(pending) if pending.ticket == ticket => {
                self.unlock(UnlockReason::PlaybackFinished, now);
                true
            }
            _ => {
                debug!(session_id = %self.id, %ticket, "ignoring stale playback completion");
                false
            }
        }
    }

    /// Fires every action due at the clock's current time and runs the audio
    /// watchdog. Returns the number of actions fired.
    pub fn tick(&mut self, clock: &dyn Clock) -> usize {
        if matches!(
            self.phase,
            SequencerPhase::NotStarted | SequencerPhase::Terminated
        ) {
            return 0;
        }
        self.tick_at(clock.now())
    }

    fn tick_at(&mut self, now: DateTime<Utc>) -> usize {
        let due = self.scheduler.take_due(now);
        let fired = due.len();
        for scheduled in due {
            self.apply(&scheduled, now, false);
        }

        if let Some(pending) = self.pending_playback {
            if now - pending.started_at >= self.audio_timeout {
                warn!(
                    session_id = %self.id,
                    ticket = %pending.ticket,
                    "no playback completion within timeout; unlocking"
                );
                self.unlock(UnlockReason::TimedOut, now);
            }
        }
        fired
    }

    fn activate(
        &mut self,
        index: usize,
        now: DateTime<Utc>,
        audio: &dyn AudioService,
    ) -> Result<(), DomainError> {
        let script = self.script.clone();
        let entry = script.entry_at(index)?;

        self.cursor = index;
        self.phase = SequencerPhase::AwaitingAudio;
        info!(session_id = %self.id, index, speaker = entry.speaker.label(), "entry activated");
        self.record(
            now,
            SequencerEventKind::EntryActivated(EntryActivated {
                index,
                speaker: entry.speaker,
                scheduled_actions: entry.actions.len(),
            }),
        );

        self.request_playback(entry.audio_cue.as_ref(), now, audio);
        self.scheduler.schedule_batch(index, now, &entry.actions);
        self.tick_at(now);
        Ok(())
    }

    fn request_playback(&mut self, cue: Option<&AudioCue>, now: DateTime<Utc>, audio: &dyn AudioService) {
        audio.stop();
        self.pending_playback = None;

        let Some(cue) = cue else {
            self.unlock(UnlockReason::NoAudioCue, now);
            return;
        };

        self.tickets_issued += 1;
        let ticket = PlaybackTicket(self.tickets_issued);
        self.record(
            now,
            SequencerEventKind::PlaybackRequested(PlaybackRequested {
                index: self.cursor,
                cue: cue.as_str().to_owned(),
                ticket,
            }),
        );

        match audio.play(cue.as_str(), ticket) {
            Ok(()) => {
                self.pending_playback = Some(PendingPlayback {
                    ticket,
                    started_at: now,
                });
            }
            Err(e) => {
                warn!(session_id = %self.id, %cue, error = %e, "audio playback failed; unlocking");
                self.unlock(UnlockReason::PlaybackFailed, now);
            }
        }
    }

    fn unlock(&mut self, reason: UnlockReason, now: DateTime<Utc>) {
        if self.phase != SequencerPhase::AwaitingAudio {
            return;
        }
        self.phase = SequencerPhase::ReadyToAdvance;
        self.pending_playback = None;
        debug!(session_id = %self.id, index = self.cursor, ?reason, "advance unlocked");
        self.record(
            now,
            SequencerEventKind::AdvanceUnlocked(AdvanceUnlocked {
                index: self.cursor,
                reason,
            }),
        );
    }

    fn settle(&mut self, now: DateTime<Utc>) {
        for scheduled in self.scheduler.take_all() {
            self.apply(&scheduled, now, true);
        }
    }

    fn apply(&mut self, scheduled: &ScheduledAction, now: DateTime<Utc>, settled_early: bool) {
        self.motion.apply(&scheduled.action, now);
        let pose = self.motion.pose();
        debug!(
            session_id = %self.id,
            entry_index = scheduled.entry_index,
            action_index = scheduled.action_index,
            x = pose.position.x,
            y = pose.position.y,
            heading = pose.heading.degrees(),
            settled_early,
            "visual action applied"
        );
        self.record(
            now,
            SequencerEventKind::ActionApplied(ActionApplied {
                entry_index: scheduled.entry_index,
                action_index: scheduled.action_index,
                pose,
                settled_early,
            }),
        );
    }

    fn record(&mut self, now: DateTime<Utc>, kind: SequencerEventKind) {
        self.version += 1;
        self.uncommitted_events.push(SequencerEvent {
            metadata: EventMetadata {
                event_type: kind.type_name().to_owned(),
                session_id: self.id,
                sequence_number: self.version,
                occurred_at: now,
            },
            kind,
        });
    }
}
