//! User settings loading and environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StagehandError, StagehandResult};

use super::types::Settings;

/// Non-fatal settings warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StagehandResult<(Settings, Vec<SettingsWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let settings: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StagehandError::InvalidSettings {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            SettingsWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((settings, warnings))
}

/// Path of the user settings file
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stagehand").join("config.toml"))
}

/// Load from the user settings file, or defaults, then apply env overrides.
///
/// A settings file that fails to parse is skipped with a warning.
pub fn load_or_default() -> (Settings, Vec<SettingsWarning>) {
    let (settings, warnings) = match user_settings_path() {
        Some(path) if path.exists() => match load_with_warnings(&path) {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("ignoring settings file: {e}");
                (Settings::default(), Vec::new())
            }
        },
        _ => (Settings::default(), Vec::new()),
    };

    (with_env_overrides(settings), warnings)
}

/// Apply environment variable overrides
pub fn with_env_overrides(settings: Settings) -> Settings {
    with_env_overrides_from(settings, |key| std::env::var(key).ok())
}

/// Apply overrides from an injected environment lookup
pub fn with_env_overrides_from(
    mut settings: Settings,
    get_env: impl Fn(&str) -> Option<String>,
) -> Settings {
    if let Some(endpoint) = get_env("STAGEHAND_PLATFORM_URL").filter(|v| !v.is_empty()) {
        settings.platform.endpoint = endpoint;
    }

    if let Some(key) = get_env("SERVERLESS_ACCESS_KEY").filter(|v| !v.is_empty()) {
        settings.platform.access_key = Some(key);
    }

    if let Some(org) = get_env("SERVERLESS_ORG").filter(|v| !v.is_empty()) {
        settings.platform.org = Some(org);
    }

    if let Some(stage) = get_env("SERVERLESS_PLATFORM_STAGE") {
        settings.platform.dev_dashboard = stage == "dev";
    }

    if let Some(interval) = get_env("STAGEHAND_POLL_INTERVAL_MS") {
        match interval.trim().parse::<u64>() {
            Ok(ms) => settings.dev.poll_interval_ms = ms,
            Err(_) => tracing::warn!(
                value = %interval,
                "invalid STAGEHAND_POLL_INTERVAL_MS, keeping {}ms",
                settings.dev.poll_interval_ms
            ),
        }
    }

    settings
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "platform",
        "endpoint",
        "access_key",
        "org",
        "dev_dashboard",
        "dev",
        "poll_interval_ms",
        "ignore",
        "output",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
