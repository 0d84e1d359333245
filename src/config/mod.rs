//! Configuration module for Stagehand
//!
//! Two kinds of configuration:
//! - The project's instance file (`serverless.yml` / `.yaml` / `.json`),
//!   loaded into an [`InstanceDescriptor`](crate::domain::entities::InstanceDescriptor)
//! - User settings (`<config_dir>/stagehand/config.toml`), layered as:
//!   1. Environment variables (`STAGEHAND_*`, `SERVERLESS_*`)
//!   2. User settings file
//!   3. Built-in defaults

mod instance;
mod loader;
mod types;
mod variables;

pub use instance::{
    find_instance_file, load_instance_config, load_instance_config_with_env, parse_document,
    InstanceLoader, ParsedDocument, BUILD_ARTIFACT_DIR, INSTANCE_FILE_NAMES,
};
pub use loader::{user_settings_path, with_env_overrides, with_env_overrides_from, SettingsWarning};
pub use types::{
    ColorMode, DevSettings, OutputSettings, PlatformSettings, Settings, DEFAULT_ENDPOINT,
    DEFAULT_POLL_INTERVAL_MS,
};
pub use variables::resolve_input_variables;
