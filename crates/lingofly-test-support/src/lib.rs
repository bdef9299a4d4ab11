//! Shared test doubles and fixtures for the Lingofly workspace.

mod audio;
mod clock;
mod host;
mod script;

pub use audio::{FailingAudioService, RecordingAudioService};
pub use clock::{FixedClock, ManualClock, fixed_now};
pub use host::RecordingSessionHost;
pub use script::{taxi_turn_script, two_entry_script, unvoiced_script};
