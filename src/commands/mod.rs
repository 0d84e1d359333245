//! Command handlers for the `stagehand` binary

pub mod deploy;
pub mod dev;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stagehand::config::{load_instance_config, Settings};
use stagehand::infrastructure::{load_instance_credentials, PlatformClient};
use stagehand::{CredentialMap, InstanceDescriptor, StagehandError};

/// Everything a deploy needs from the project directory
pub(crate) struct Project {
    pub dir: PathBuf,
    pub instance: InstanceDescriptor,
    pub credentials: CredentialMap,
}

/// User settings plus env overrides; unknown keys are reported unless in JSON mode
pub(crate) fn load_settings(json: bool) -> Settings {
    let (settings, warnings) = Settings::load_or_default();
    if !json && !warnings.is_empty() {
        crate::ui::output::print_settings_warnings(&warnings, settings.output.unicode);
    }
    settings
}

pub(crate) fn load_project(dir: &Path, settings: &Settings) -> Result<Project> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("project directory {} is not accessible", dir.display()))?;

    let instance = load_instance_config(&dir, settings.platform.org.as_deref())
        .map_err(StagehandError::from)?;
    let credentials = load_instance_credentials(&dir, &instance.stage)?;

    let providers = credentials.configured_providers();
    if providers.is_empty() {
        tracing::info!("no provider credentials found in the environment");
    } else {
        tracing::info!(?providers, "resolved provider credentials");
    }

    Ok(Project {
        dir,
        instance,
        credentials,
    })
}

pub(crate) fn platform_client(settings: &Settings) -> Result<PlatformClient> {
    let client = PlatformClient::new(
        &settings.platform.endpoint,
        settings.platform.access_key.clone(),
    )
    .map_err(StagehandError::from)?;
    tracing::debug!(endpoint = client.endpoint(), "platform client ready");
    Ok(client)
}

/// Local wall-clock time for event prefixes
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
