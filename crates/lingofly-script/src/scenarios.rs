//! Compiled-in scenarios.

use lingofly_core::error::DomainError;
use lingofly_core::geometry::{Heading, NormalizedPoint, Pose};
use serde::Serialize;

use crate::domain::entry::{ScriptEntry, Speaker, VisualAction};
use crate::domain::store::ScriptStore;

/// A script together with where the plane icon starts on the map.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Human-readable scenario name.
    pub title: &'static str,
    /// Pose of the icon before any action fires.
    pub initial_pose: Pose,
    /// The dialogue.
    pub script: ScriptStore,
}

/// Serializable summary of a scenario for the view layer.
#[derive(Debug, Serialize)]
pub struct ScenarioView<'a> {
    /// Human-readable scenario name.
    pub title: &'static str,
    /// Pose of the icon before any action fires.
    pub initial_pose: Pose,
    /// Every entry in order.
    pub entries: &'a [ScriptEntry],
}

impl Scenario {
    /// Borrowed view of the scenario suitable for serialization.
    #[must_use]
    pub fn view(&self) -> ScenarioView<'_> {
        ScenarioView {
            title: self.title,
            initial_pose: self.initial_pose,
            entries: self.script.entries(),
        }
    }
}

const CUE: &str = "atc1";

/// Los Alamitos departure: taxi clearance for Runway 4R through the Unicom
/// handoff after takeoff, flown by Cessna N739KD.
///
/// # Errors
///
/// Returns `DomainError::InvalidScript` only if the literal content below is
/// edited into an invalid state.
pub fn los_alamitos_departure() -> Result<Scenario, DomainError> {
    let entries = vec![
        ScriptEntry::new(
            Speaker::Pilot,
            "Los Alamitos Ground, Cessna N739KD, requesting taxi clearance to Runway 4R.",
        )
        .with_spoken(
            "Los Alamitos Ground, Cessna November Seven Three Niner Kilo Delta, requesting taxi \
             clearance to Runway Four Right.",
        )
        .with_audio(CUE),
        ScriptEntry::new(
            Speaker::AtcGround,
            "Cessna N739KD, taxi to Runway 4R, via bravo, cross Runway 4L, hold short of Runway 4R.",
        )
        .with_spoken(
            "Cessna November Seven Three Niner Kilo Delta, taxi to Runway Four Right, via Bravo, \
             cross Runway Four Left, hold short of Runway Four Right.",
        )
        .with_audio(CUE),
        ScriptEntry::new(
            Speaker::Pilot,
            "Taxi to Runway 4R via bravo, cross Runway 4L, hold short of Runway 4R, Cessna 9KD.",
        )
        .with_spoken(
            "Taxi to Runway Four Right via Bravo, cross Runway Four Left, hold short of Runway \
             Four Right, Cessna Niner Kilo Delta.",
        )
        .with_audio(CUE)
        .with_action(VisualAction::move_to(0.81, 0.96))
        .with_action(VisualAction::turn_to(242.0).after(0.5))
        .with_action(VisualAction::move_to(0.765, 0.84).after(1.0)),
        ScriptEntry::new(Speaker::AtcGround, "Cessna 9KD, contact Tower 118.4.")
            .with_spoken("Cessna Niner Kilo Delta, contact Tower One One Eight Point Four.")
            .with_audio(CUE),
        ScriptEntry::new(Speaker::Pilot, "Over to Tower, Cessna 9KD.")
            .with_spoken("Over to Tower, Cessna Niner Kilo Delta.")
            .with_audio(CUE),
        ScriptEntry::new(
            Speaker::Pilot,
            "Los Alamitos Tower, Cessna N739KD holding short Runway 4R, ready for departure.",
        )
        .with_spoken(
            "Los Alamitos Tower, Cessna November Seven Three Niner Kilo Delta holding short \
             Runway Four Right, ready for departure.",
        )
        .with_audio(CUE),
        ScriptEntry::new(
            Speaker::AtcTower,
            "Cessna 9KD, winds 224 at 3, Runway 4R cleared for takeoff. Fly runway heading after \
             departure.",
        )
        .with_spoken(
            "Cessna Niner Kilo Delta, winds Two Two Four at Three, Runway Four Right cleared for \
             takeoff. Fly runway heading after departure.",
        )
        .with_audio(CUE),
        ScriptEntry::new(
            Speaker::Pilot,
            "Cleared for takeoff Runway 4R, fly runway heading, Cessna 9KD.",
        )
        .with_spoken(
            "Cleared for takeoff Runway Four Right, fly runway heading, Cessna Niner Kilo Delta.",
        )
        .with_audio(CUE)
        .with_action(VisualAction::move_to(0.43, 0.1)),
        ScriptEntry::new(Speaker::AtcTower, "Cessna 9KD, climb and maintain 2,500 feet.")
            .with_spoken(
                "Cessna Niner Kilo Delta, climb and maintain Two Thousand Five Hundred feet.",
            )
            .with_audio(CUE),
        ScriptEntry::new(Speaker::Pilot, "Climb and maintain 2,500, Cessna 9KD.")
            .with_spoken("Climb and maintain Two Thousand Five Hundred, Cessna Niner Kilo Delta.")
            .with_audio(CUE),
        ScriptEntry::new(Speaker::AtcTower, "Cessna 9KD, monitor Unicom 122.95. Bye bye.")
            .with_spoken(
                "Cessna Niner Kilo Delta, monitor Unicom One Two Two Point Niner Five. Bye bye.",
            )
            .with_audio(CUE),
        ScriptEntry::new(
            Speaker::Pilot,
            "Wilco, switching to Unicom at 122.95, Cessna 9KD.",
        )
        .with_spoken(
            "Wilco, switching to Unicom at One Two Two Point Niner Five, Cessna Niner Kilo Delta.",
        )
        .with_audio(CUE),
    ];

    Ok(Scenario {
        title: "Los Alamitos departure, Runway 4R",
        initial_pose: Pose {
            position: NormalizedPoint::new(0.15, 0.775)?,
            heading: Heading(11.0),
        },
        script: ScriptStore::new(entries)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_los_alamitos_departure_is_valid() {
        let scenario = los_alamitos_departure().unwrap();

        assert_eq!(scenario.script.entry_count(), 12);
        assert_eq!(
            scenario.initial_pose.position,
            NormalizedPoint { x: 0.15, y: 0.775 }
        );
        assert_eq!(scenario.initial_pose.heading, Heading(11.0));
    }

    #[test]
    fn test_los_alamitos_taxi_entry_moves_turns_then_moves() {
        let scenario = los_alamitos_departure().unwrap();

        let taxi = scenario.script.entry_at(2).unwrap();

        assert_eq!(taxi.speaker, Speaker::Pilot);
        assert_eq!(taxi.actions.len(), 3);
        assert_eq!(taxi.actions[1].target_heading, Some(Heading(242.0)));
        assert!((taxi.actions[2].delay_secs - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_los_alamitos_every_entry_has_audio_and_phonetics() {
        let scenario = los_alamitos_departure().unwrap();

        for entry in scenario.script.entries() {
            assert_eq!(entry.audio_cue.as_ref().map(|c| c.as_str()), Some("atc1"));
            assert!(entry.spoken.is_some());
        }
    }

    #[test]
    fn test_scenario_view_serializes_entries() {
        let scenario = los_alamitos_departure().unwrap();

        let json = serde_json::to_value(scenario.view()).unwrap();

        assert_eq!(json["entries"].as_array().unwrap().len(), 12);
        assert_eq!(json["initial_pose"]["heading"], 11.0);
        assert_eq!(json["entries"][7]["actions"][0]["target_position"]["x"], 0.43);
    }
}
