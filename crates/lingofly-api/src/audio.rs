//! Audio service backed by the asset directory.
//!
//! The server does not decode audio itself. It checks that a cue's file
//! exists, hands the ticket to the client through the session view, and waits
//! for the client to report completion. A missing file is reported as
//! `ResourceMissing`, which the sequencer treats as an immediate completion.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use lingofly_core::audio::{AudioService, PlaybackTicket};
use lingofly_core::error::DomainError;
use tracing::{debug, info};

/// File extension of every audio cue.
pub const CUE_EXTENSION: &str = "mp3";

/// Resolves cues to `<asset_dir>/<cue>.mp3`.
#[derive(Debug)]
pub struct AssetAudioService {
    asset_dir: PathBuf,
    now_playing: Mutex<Option<PlaybackTicket>>,
}

impl AssetAudioService {
    /// Create a service reading from `asset_dir`.
    #[must_use]
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            now_playing: Mutex::new(None),
        }
    }

    /// Directory the cues are resolved against.
    #[must_use]
    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Path a cue resolves to.
    #[must_use]
    pub fn cue_path(&self, cue: &str) -> PathBuf {
        self.asset_dir.join(format!("{cue}.{CUE_EXTENSION}"))
    }

    /// Ticket of the playback currently handed to the client.
    pub fn now_playing(&self) -> Option<PlaybackTicket> {
        *self.now_playing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioService for AssetAudioService {
    fn play(&self, cue: &str, ticket: PlaybackTicket) -> Result<(), DomainError> {
        let path = self.cue_path(cue);
        if !path.is_file() {
            return Err(DomainError::ResourceMissing(path.display().to_string()));
        }
        info!(%ticket, path = %path.display(), "cue ready for client playback");
        *self.now_playing.lock().unwrap_or_else(PoisonError::into_inner) = Some(ticket);
        Ok(())
    }

    fn stop(&self) {
        if let Some(ticket) = self
            .now_playing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            debug!(%ticket, "playback stopped");
        }
    }
}
