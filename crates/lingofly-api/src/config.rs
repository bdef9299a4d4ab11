//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::TimeDelta;

use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ASSET_DIR: &str = "assets";
const DEFAULT_AUDIO_TIMEOUT_SECS: i64 = 30;
const DEFAULT_TICK_MILLIS: u64 = 50;

/// Runtime settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Directory holding `<cue>.mp3` files (`LINGOFLY_ASSET_DIR`).
    pub asset_dir: PathBuf,
    /// How long to wait for a playback completion before unlocking anyway
    /// (`LINGOFLY_AUDIO_TIMEOUT_SECS`).
    pub audio_timeout: TimeDelta,
    /// How often the sequencer clock is pumped (`LINGOFLY_TICK_MILLIS`).
    pub tick_interval: Duration,
}

impl ApiConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// unset keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value cannot be parsed or is zero where
    /// a positive value is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let asset_dir = lookup("LINGOFLY_ASSET_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR), PathBuf::from);

        let audio_timeout_secs: i64 = match lookup("LINGOFLY_AUDIO_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("LINGOFLY_AUDIO_TIMEOUT_SECS must be an integer: {e}"))
            })?,
            None => DEFAULT_AUDIO_TIMEOUT_SECS,
        };
        if !(1..=3600).contains(&audio_timeout_secs) {
            return Err(AppError::Config(
                "LINGOFLY_AUDIO_TIMEOUT_SECS must be between 1 and 3600".to_string(),
            ));
        }

        let tick_millis: u64 = match lookup("LINGOFLY_TICK_MILLIS") {
            Some(raw) => raw.parse().map_err(|e| {
                AppError::Config(format!("LINGOFLY_TICK_MILLIS must be an integer: {e}"))
            })?,
            None => DEFAULT_TICK_MILLIS,
        };
        if tick_millis == 0 {
            return Err(AppError::Config(
                "LINGOFLY_TICK_MILLIS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            asset_dir,
            audio_timeout: TimeDelta::seconds(audio_timeout_secs),
            tick_interval: Duration::from_millis(tick_millis),
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
