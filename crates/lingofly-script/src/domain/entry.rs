//! Dialogue entries and the visual actions attached to them.

use lingofly_core::error::DomainError;
use lingofly_core::geometry::{Heading, NormalizedPoint};
use serde::Serialize;

/// Who is transmitting a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The student pilot.
    Pilot,
    /// Ground control.
    AtcGround,
    /// The tower controller.
    AtcTower,
}

impl Speaker {
    /// Label shown in front of the line in the dialogue bar.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pilot => "Pilot (You)",
            Self::AtcGround => "ATC Ground",
            Self::AtcTower => "ATC Tower",
        }
    }
}

/// Identifier the audio collaborator resolves to a sound resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AudioCue(String);

impl AudioCue {
    /// Creates a cue from its resource name (without extension).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the resource name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AudioCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Longest delay an action may declare, in seconds.
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// A timed change to the plane icon's position and/or heading.
///
/// `delay_secs` is measured from the moment the owning entry becomes active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualAction {
    /// Where to move the icon, if anywhere.
    pub target_position: Option<NormalizedPoint>,
    /// Which way to turn the icon, if at all.
    pub target_heading: Option<Heading>,
    /// Offset from the start of the entry's action batch.
    pub delay_secs: f64,
}

impl VisualAction {
    /// An action that moves the icon to `(x, y)` as soon as the entry starts.
    #[must_use]
    pub fn move_to(x: f64, y: f64) -> Self {
        Self {
            target_position: Some(NormalizedPoint { x, y }),
            target_heading: None,
            delay_secs: 0.0,
        }
    }

    /// An action that turns the icon to `degrees` as soon as the entry starts.
    #[must_use]
    pub fn turn_to(degrees: f64) -> Self {
        Self {
            target_position: None,
            target_heading: Some(Heading(degrees)),
            delay_secs: 0.0,
        }
    }

    /// Returns the action with its delay replaced.
    #[must_use]
    pub fn after(mut self, delay_secs: f64) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    /// Returns the action with a heading change added.
    #[must_use]
    pub fn and_turn_to(mut self, degrees: f64) -> Self {
        self.target_heading = Some(Heading(degrees));
        self
    }

    /// Checks coordinates, heading and delay.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScript` on the first invalid field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(position) = &self.target_position {
            position.validate()?;
        }
        if let Some(heading) = self.target_heading {
            heading.validate()?;
        }
        if !(0.0..=MAX_DELAY_SECS).contains(&self.delay_secs) {
            return Err(DomainError::InvalidScript(format!(
                "delay {} must be between 0 and {MAX_DELAY_SECS} seconds",
                self.delay_secs
            )));
        }
        Ok(())
    }
}

/// One line of the dialogue script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptEntry {
    /// Who transmits the line.
    pub speaker: Speaker,
    /// Text shown in the dialogue bar.
    pub text: String,
    /// Radio-phonetic reading of the line, if the script provides one.
    pub spoken: Option<String>,
    /// Sound to play while the line is shown.
    pub audio_cue: Option<AudioCue>,
    /// Icon moves to run while the line plays, in declaration order.
    pub actions: Vec<VisualAction>,
}

impl ScriptEntry {
    /// Creates an entry with no audio, no phonetic reading and no actions.
    #[must_use]
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            spoken: None,
            audio_cue: None,
            actions: Vec::new(),
        }
    }

    /// Sets the audio cue.
    #[must_use]
    pub fn with_audio(mut self, cue: impl Into<String>) -> Self {
        self.audio_cue = Some(AudioCue::new(cue));
        self
    }

    /// Sets the phonetic reading.
    #[must_use]
    pub fn with_spoken(mut self, spoken: impl Into<String>) -> Self {
        self.spoken = Some(spoken.into());
        self
    }

    /// Appends a visual action.
    #[must_use]
    pub fn with_action(mut self, action: VisualAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Line as displayed in the dialogue bar: `"<speaker>: <text>"`.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("{}: {}", self.speaker.label(), self.text)
    }

    /// Checks the text and every action.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScript` if the text is blank or any action
    /// is invalid.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.text.trim().is_empty() {
            return Err(DomainError::InvalidScript(
                "entry text must not be empty".to_owned(),
            ));
        }
        self.actions.iter().try_for_each(VisualAction::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_prefixes_speaker_label() {
        let entry = ScriptEntry::new(Speaker::AtcGround, "Cessna 9KD, contact Tower 118.4.");

        assert_eq!(entry.caption(), "ATC Ground: Cessna 9KD, contact Tower 118.4.");
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        let entry = ScriptEntry::new(Speaker::Pilot, "   ");

        assert!(matches!(
            entry.validate(),
            Err(DomainError::InvalidScript(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_delay() {
        let entry =
            ScriptEntry::new(Speaker::Pilot, "Wilco.").with_action(VisualAction::turn_to(90.0).after(-0.5));

        match entry.validate() {
            Err(DomainError::InvalidScript(message)) => assert!(message.contains("delay")),
            other => panic!("expected InvalidScript, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_position_off_map() {
        let entry =
            ScriptEntry::new(Speaker::Pilot, "Wilco.").with_action(VisualAction::move_to(0.5, 1.01));

        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_builders_compose_a_move_and_turn() {
        let action = VisualAction::move_to(0.81, 0.96).and_turn_to(242.0).after(1.5);

        assert_eq!(action.target_position, Some(NormalizedPoint { x: 0.81, y: 0.96 }));
        assert_eq!(action.target_heading, Some(Heading(242.0)));
        assert!((action.delay_secs - 1.5).abs() < f64::EPSILON);
        assert!(action.validate().is_ok());
    }

    #[test]
    fn test_speaker_serializes_as_snake_case() {
        let json = serde_json::to_value(Speaker::AtcTower).unwrap();

        assert_eq!(json, serde_json::json!("atc_tower"));
    }
}
