//! Logical-clock scheduler for a line's visual actions.
//!
//! Nothing here owns a timer. Actions are stored with the instant they become
//! due, and the sequencer pulls them out whenever it is told the time.

use chrono::{DateTime, Utc};
use lingofly_core::clock::offset_from_secs;
use lingofly_script::domain::entry::VisualAction;

/// A visual action waiting for its fire time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledAction {
    /// Line the action belongs to.
    pub entry_index: usize,
    /// Declaration order within the line.
    pub action_index: usize,
    /// When the action becomes due.
    pub fire_at: DateTime<Utc>,
    /// The action itself.
    pub action: VisualAction,
}

/// Pending actions kept in fire order.
///
/// Invariant: `pending` is sorted by `fire_at`, and actions sharing a fire
/// time keep the order they were scheduled in.
#[derive(Debug, Default)]
pub struct ActionScheduler {
    pending: Vec<ScheduledAction>,
}

impl ActionScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules every action of a line at `batch_start + delay`.
    pub fn schedule_batch(
        &mut self,
        entry_index: usize,
        batch_start: DateTime<Utc>,
        actions: &[VisualAction],
    ) {
        self.pending
            .extend(actions.iter().enumerate().map(|(action_index, action)| {
                ScheduledAction {
                    entry_index,
                    action_index,
                    fire_at: batch_start
                        .checked_add_signed(offset_from_secs(action.delay_secs))
                        .unwrap_or(DateTime::<Utc>::MAX_UTC),
                    action: action.clone(),
                }
            }));
        // Stable: ties stay in declaration order.
        self.pending.sort_by_key(|scheduled| scheduled.fire_at);
    }

    /// Removes and returns every action due at or before `now`, in fire order.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<ScheduledAction> {
        let split = self.pending.partition_point(|scheduled| scheduled.fire_at <= now);
        self.pending.drain(..split).collect()
    }

    /// Removes and returns every pending action, in fire order.
    pub fn take_all(&mut self) -> Vec<ScheduledAction> {
        std::mem::take(&mut self.pending)
    }

    /// Discards every pending action and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Number of pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fire time of the next pending action.
    #[must_use]
    pub fn next_fire_at(&self) -> Option<DateTime<Utc>> {
        self.pending.first().map(|scheduled| scheduled.fire_at)
    }
}
