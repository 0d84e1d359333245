//! Credential sources: process environment and per-stage dot-env files

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::entities::CredentialMap;
use crate::domain::ports::CredentialSource;
use crate::error::{StagehandError, StagehandResult};

/// Reads the live process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl CredentialSource for ProcessEnv {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Parsed contents of a `.env` / `.env.<stage>` file
#[derive(Debug, Clone, Default)]
pub struct DotEnvFile {
    /// File path as shown in diagnostics
    label: String,
    vars: HashMap<String, String>,
}

impl DotEnvFile {
    /// Parse `path` without touching the process environment
    pub fn load(path: &Path) -> StagehandResult<Self> {
        let invalid = |e: dotenvy::Error| StagehandError::DotEnv {
            file: path.to_path_buf(),
            message: e.to_string(),
        };

        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(invalid)? {
            let (key, value) = item.map_err(invalid)?;
            vars.insert(key, value);
        }
        tracing::debug!(file = %path.display(), count = vars.len(), "loaded env file");

        Ok(Self {
            label: path.display().to_string(),
            vars,
        })
    }
}

impl CredentialSource for DotEnvFile {
    fn name(&self) -> &str {
        &self.label
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// `.env.<stage>` when present, otherwise `.env`
pub fn stage_env_file(dir: &Path, stage: &str) -> Option<PathBuf> {
    let staged = dir.join(format!(".env.{stage}"));
    if !stage.is_empty() && staged.is_file() {
        return Some(staged);
    }
    let default = dir.join(".env");
    default.is_file().then_some(default)
}

/// Resolve provider credentials for `stage`.
///
/// Process environment wins over the env file.
pub fn load_instance_credentials(dir: &Path, stage: &str) -> StagehandResult<CredentialMap> {
    let file = stage_env_file(dir, stage)
        .map(|path| DotEnvFile::load(&path))
        .transpose()?
        .unwrap_or_default();

    let process = ProcessEnv;
    Ok(CredentialMap::resolve(&[&process, &file]))
}
