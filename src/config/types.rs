//! User settings type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StagehandResult;

use super::loader::{self, SettingsWarning};

/// Default platform API root
pub const DEFAULT_ENDPOINT: &str = "https://api.serverless.com/platform";

/// Default delay between status polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Remote platform connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub access_key: Option<String>,

    /// Org used when the instance file names none
    #[serde(default)]
    pub org: Option<String>,

    /// Link to the development dashboard instead of production
    #[serde(default)]
    pub dev_dashboard: bool,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_key: None,
            org: None,
            dev_dashboard: false,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Dev mode settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Extra gitignore-style patterns excluded from watching
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for DevSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            ignore: Vec::new(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Contents of `<config_dir>/stagehand/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub platform: PlatformSettings,

    #[serde(default)]
    pub dev: DevSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> StagehandResult<Self> {
        let (settings, _warnings) = loader::load_with_warnings(path)?;
        Ok(settings)
    }

    /// Load settings and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> StagehandResult<(Self, Vec<SettingsWarning>)> {
        loader::load_with_warnings(path)
    }

    /// User settings file (if present) with environment overrides applied
    pub fn load_or_default() -> (Self, Vec<SettingsWarning>) {
        loader::load_or_default()
    }
}
