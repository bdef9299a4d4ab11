//! Script fixtures shared across sequencer and API tests.

use lingofly_core::geometry::{Heading, NormalizedPoint, Pose};
use lingofly_script::domain::entry::{ScriptEntry, Speaker, VisualAction};
use lingofly_script::domain::store::ScriptStore;

fn start_pose() -> Pose {
    Pose {
        position: NormalizedPoint { x: 0.15, y: 0.775 },
        heading: Heading(11.0),
    }
}

/// Two voiced entries; the second moves the plane to `(0.43, 0.1)`.
///
/// # Panics
///
/// Never: the literal content is valid.
#[must_use]
pub fn two_entry_script() -> (ScriptStore, Pose) {
    let store = ScriptStore::new(vec![
        ScriptEntry::new(Speaker::Pilot, "Ready for departure.").with_audio("atc1"),
        ScriptEntry::new(Speaker::AtcTower, "Cleared for takeoff.")
            .with_audio("atc2")
            .with_action(VisualAction::move_to(0.43, 0.1)),
    ])
    .unwrap();
    (store, start_pose())
}

/// Three voiced entries; the middle one carries the taxi batch
/// `[move (0.81, 0.96) @0s, turn 242 @0.5s, move (0.765, 0.84) @1s]`.
///
/// # Panics
///
/// Never: the literal content is valid.
#[must_use]
pub fn taxi_turn_script() -> (ScriptStore, Pose) {
    let store = ScriptStore::new(vec![
        ScriptEntry::new(Speaker::AtcGround, "Taxi to Runway 4R via bravo.").with_audio("atc1"),
        ScriptEntry::new(Speaker::Pilot, "Taxi to Runway 4R via bravo, Cessna 9KD.")
            .with_audio("atc2")
            .with_action(VisualAction::move_to(0.81, 0.96))
            .with_action(VisualAction::turn_to(242.0).after(0.5))
            .with_action(VisualAction::move_to(0.765, 0.84).after(1.0)),
        ScriptEntry::new(Speaker::AtcGround, "Contact Tower 118.4.")
            .with_audio("atc3")
            .with_action(VisualAction::move_to(0.43, 0.1)),
    ])
    .unwrap();
    (store, start_pose())
}

/// Two entries without audio cues.
///
/// # Panics
///
/// Never: the literal content is valid.
#[must_use]
pub fn unvoiced_script() -> (ScriptStore, Pose) {
    let store = ScriptStore::new(vec![
        ScriptEntry::new(Speaker::Pilot, "Radio check."),
        ScriptEntry::new(Speaker::AtcGround, "Loud and clear."),
    ])
    .unwrap();
    (store, start_pose())
}
