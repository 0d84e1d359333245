//! Error types for Stagehand
//!
//! Library errors use `thiserror`. Deployment failures are not errors here:
//! they travel as data inside a [`DeploymentOutcome`](crate::domain::entities::DeploymentOutcome).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stagehand operations
pub type StagehandResult<T> = Result<T, StagehandError>;

/// Result type alias for instance configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main error type for Stagehand operations
#[derive(Error, Debug)]
pub enum StagehandError {
    /// Instance configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote platform call failed outside of a deploy
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Invalid user settings file
    #[error("invalid settings in {file}: {message}")]
    InvalidSettings { file: PathBuf, message: String },

    /// A dot-env file exists but could not be parsed
    #[error("invalid env file {file}: {message}")]
    DotEnv { file: PathBuf, message: String },

    /// Filesystem watch could not be established
    #[error("failed to watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The event channel feeding dev mode closed unexpectedly
    #[error("dev mode event channel closed")]
    ChannelClosed,
}

/// Failures while loading `serverless.yml` / `serverless.yaml` / `serverless.json`
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No instance file in the project directory
    #[error("serverless config file was not found in {dir}")]
    NotFound { dir: PathBuf },

    /// Required property missing after defaults were applied
    #[error("Missing \"{field}\" property in {file}")]
    MissingField { field: &'static str, file: PathBuf },

    /// YAML text could not be parsed
    #[error("invalid YAML in {file}: {message}")]
    Yaml { file: PathBuf, message: String },

    /// JSON text could not be parsed
    #[error("invalid JSON in {file}: {message}")]
    Json { file: PathBuf, message: String },

    /// Parsed document has the wrong shape (e.g. a list at the top level)
    #[error("invalid instance config in {file}: {message}")]
    Shape { file: PathBuf, message: String },

    /// IO error
    #[error("IO error reading {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures at the remote platform boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Non-success HTTP status, with the platform's message when present
    #[error("{status} - {message}")]
    Status { status: u16, message: String },

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Response body did not match the expected shape
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Polling exceeded the deployment ceiling
    #[error("Deployment timeout, please retry in a few seconds")]
    DeploymentTimeout,
}
