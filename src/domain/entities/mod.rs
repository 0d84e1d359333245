//! Domain Entities
//!
//! - `InstanceDescriptor` - normalized contents of the instance file
//! - `CredentialMap` - provider credentials handed to each deploy
//! - `DeploymentOutcome` - settled result of one deploy

mod credentials;
mod instance;
mod outcome;

pub use credentials::{CredentialMap, ProviderCredentials, PROVIDER_ENV_VARS};
pub use instance::{InstanceDescriptor, InstanceKey, DEFAULT_STAGE};
pub use outcome::{
    DeploymentFailure, DeploymentOutcome, ExecutionTarget, InstanceInfo, InstanceState,
    InstanceStatus,
};
