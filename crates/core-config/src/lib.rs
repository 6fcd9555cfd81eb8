//! Configuration loading and parsing.
//!
//! Parses `infiniscroll.toml` (or an override path provided by the host)
//! with two tables:
//!
//! ```toml
//! [list]
//! item_height = 50.0       # default 50
//! viewport_height = 1000.0 # default: the host's viewport height
//!
//! [watch]
//! batch_policy = "coalesce" # or "drop_multi"
//! ```
//!
//! Unknown fields are ignored so that hosts can keep their own settings in the
//! same file. A missing file yields defaults; a malformed file yields defaults
//! plus a `config` warning. Height validation happens in
//! `ListConfig::resolve` and `validate_heights`; the geometry calculator adds
//! `ConfigurationError::GeometryTooLarge` for ratios it cannot size.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "infiniscroll.toml";
pub const DEFAULT_ITEM_HEIGHT: f64 = 50.0;

/// Construction-time misconfiguration. Prevents initialization.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("item height must be a positive finite number, got {0}")]
    NonPositiveItemHeight(f64),
    #[error("viewport height must be a positive finite number, got {0}")]
    NonPositiveViewportHeight(f64),
    #[error("viewport {viewport_height} over item {item_height} needs too many slots")]
    GeometryTooLarge {
        item_height: f64,
        viewport_height: f64,
    },
}

/// Check both geometry inputs. Shared by config resolution and `Geometry`.
pub fn validate_heights(item_height: f64, viewport_height: f64) -> Result<(), ConfigurationError> {
    if !(item_height.is_finite() && item_height > 0.0) {
        return Err(ConfigurationError::NonPositiveItemHeight(item_height));
    }
    if !(viewport_height.is_finite() && viewport_height > 0.0) {
        return Err(ConfigurationError::NonPositiveViewportHeight(viewport_height));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    #[serde(default = "ListConfig::default_item_height")]
    pub item_height: f64,
    /// `None` means "use the host viewport height".
    #[serde(default)]
    pub viewport_height: Option<f64>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            item_height: Self::default_item_height(),
            viewport_height: None,
        }
    }
}

impl ListConfig {
    const fn default_item_height() -> f64 {
        DEFAULT_ITEM_HEIGHT
    }

    /// Resolve the viewport default against the host and validate.
    /// Returns `(item_height, viewport_height)`.
    pub fn resolve(&self, host_viewport_height: f64) -> Result<(f64, f64), ConfigurationError> {
        let viewport_height = self.viewport_height.unwrap_or(host_viewport_height);
        validate_heights(self.item_height, viewport_height)?;
        if self.viewport_height.is_none() {
            info!(
                target: "config",
                viewport_height,
                "viewport_height_from_host"
            );
        }
        Ok((self.item_height, viewport_height))
    }
}

/// How a notification batch carrying several crossings is interpreted.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Dedupe by slot; act on a lone edge, drop batches where both edges entered.
    #[default]
    Coalesce,
    /// Drop any batch with more than one entry.
    DropMulti,
}

impl BatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchPolicy::Coalesce => "coalesce",
            BatchPolicy::DropMulti => "drop_multi",
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct WatchConfig {
    #[serde(default)]
    pub batch_policy: BatchPolicy,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path the file was read from; `None` when defaults were used.
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Best-effort config path: working directory first, then the platform
/// config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("infiniscroll").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                item_height = file.list.item_height,
                viewport_height = file.list.viewport_height,
                batch_policy = file.watch.batch_policy.as_str(),
                "config_loaded"
            );
            Ok(Config {
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}
