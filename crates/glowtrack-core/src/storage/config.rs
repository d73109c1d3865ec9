//! TOML-based application configuration.
//!
//! Deployment knobs only: where media goes, how often a failed media delete
//! is retried, and which UTC offset resolves "today" at the CLI edge. The
//! reset threshold and milestone ladder are product constants and are not
//! configurable here.
//!
//! Configuration is stored at `~/.config/glowtrack/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hours offset from UTC used to resolve the user's calendar day
    #[serde(default)]
    pub timezone_offset_hours: i32,

    /// Retries per media delete during a reset before giving up on that file
    #[serde(default = "default_media_retry_limit")]
    pub media_retry_limit: u32,

    /// Media root; defaults to `<data_dir>/media`
    #[serde(default)]
    pub media_dir: Option<PathBuf>,

    /// User id assumed by the CLI when `--user` is omitted
    #[serde(default)]
    pub default_user: Option<String>,
}

fn default_media_retry_limit() -> u32 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone_offset_hours: 0,
            media_retry_limit: default_media_retry_limit(),
            media_dir: None,
            default_user: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Media root directory, explicit or the default under the data dir.
    pub fn media_root(&self) -> Result<PathBuf, ConfigError> {
        match &self.media_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("media")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.timezone_offset_hours, 0);
        assert_eq!(cfg.media_retry_limit, 2);
        assert!(cfg.media_dir.is_none());
        assert!(cfg.default_user.is_none());
    }

    #[test]
    fn test_round_trip() {
        let cfg = Config {
            timezone_offset_hours: 9,
            media_retry_limit: 5,
            media_dir: Some(PathBuf::from("/tmp/media")),
            default_user: Some("mina".to_string()),
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.timezone_offset_hours, 9);
        assert_eq!(parsed.media_retry_limit, 5);
        assert_eq!(parsed.default_user.as_deref(), Some("mina"));
    }
}
