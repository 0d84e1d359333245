//! Stagehand - deploy serverless component instances from the command line
//!
//! Stagehand reads a project's instance file (`serverless.yml`), resolves
//! provider credentials from the environment, and deploys the instance to the
//! remote platform. Dev mode watches the project and redeploys on every change,
//! with at most one deploy in flight and bursts of edits coalesced into a
//! single follow-up deploy.
//!
//! ## Layout
//!
//! - `domain` - entities and ports (no I/O)
//! - `application` - status poller, dev-mode coordinator and session
//! - `infrastructure` - HTTP platform client, credential sources, file watcher
//! - `config` - instance file and user settings loading

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    CloseReport, CloseStatus, Deployer, DevEvent, DevSession, StatusPoller, DEPLOYMENT_TIMEOUT,
};
pub use config::{load_instance_config, InstanceLoader, Settings};
pub use domain::entities::{
    CredentialMap, DeploymentOutcome, InstanceDescriptor, InstanceStatus,
};
pub use error::{ConfigError, PlatformError, StagehandError, StagehandResult};
