//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` before calling [`Config::from_env`],
//! so every variable can live in the environment or in that file.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPLOAD_DIR: &str = "static/floorplans";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.03;
pub const DEFAULT_PERSIST_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Name of the snapshot file inside the data directory.
pub const SNAPSHOT_FILE: &str = "floorplan.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("SNAP_THRESHOLD must be a finite number in [0, 1], got {0}")]
    InvalidSnapThreshold(f64),
    #[error("PERSIST_INTERVAL_MS must be greater than zero")]
    ZeroPersistInterval,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// Where uploaded floorplan images are written; served under `/static/floorplans`.
    pub upload_dir: PathBuf,
    /// Holds the JSON snapshot and uploaded schedule CSVs.
    pub data_dir: PathBuf,
    /// Normalized distance within which a hallway endpoint reuses an existing space.
    pub snap_threshold: f64,
    pub persist_interval_ms: u64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            persist_interval_ms: DEFAULT_PERSIST_INTERVAL_MS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `UPLOAD_DIR`: default `static/floorplans`
    /// - `DATA_DIR`: default `data`
    /// - `SNAP_THRESHOLD`: default 0.03
    /// - `PERSIST_INTERVAL_MS`: default 1000
    /// - `MAX_UPLOAD_BYTES`: default 16 MiB
    ///
    /// Unset or blank variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a value does not parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            port: env_parse("PORT", DEFAULT_PORT)?,
            upload_dir: env_path("UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            data_dir: env_path("DATA_DIR", DEFAULT_DATA_DIR),
            snap_threshold: env_parse("SNAP_THRESHOLD", DEFAULT_SNAP_THRESHOLD)?,
            persist_interval_ms: env_parse("PERSIST_INTERVAL_MS", DEFAULT_PERSIST_INTERVAL_MS)?,
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.snap_threshold.is_finite() || !(0.0..=1.0).contains(&self.snap_threshold) {
            return Err(ConfigError::InvalidSnapThreshold(self.snap_threshold));
        }
        if self.persist_interval_ms == 0 {
            return Err(ConfigError::ZeroPersistInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }
}

/// Parse `key` from the environment, or `default` when unset or blank.
pub(crate) fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Copy,
{
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse::<T>().map_err(|_| ConfigError::Invalid { key, value: trimmed.to_owned() })
}

fn env_path(key: &str, default: &str) -> PathBuf {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
        _ => PathBuf::from(default),
    }
}
