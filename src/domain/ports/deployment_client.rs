//! Deployment Client Port
//!
//! The remote platform is an opaque boundary: submit a deploy, then read the
//! instance record back. Implemented over HTTP in
//! `infrastructure::platform`, and by scripted fakes in tests.

use crate::domain::entities::{CredentialMap, InstanceDescriptor, InstanceInfo, InstanceKey};
use crate::error::PlatformError;

pub trait DeploymentClient: Send + Sync {
    /// Submit a deploy. Returns as soon as the platform accepts the request.
    fn deploy(
        &self,
        instance: &InstanceDescriptor,
        credentials: &CredentialMap,
    ) -> Result<(), PlatformError>;

    /// Fetch the current instance record
    fn get_instance(&self, key: InstanceKey<'_>) -> Result<InstanceInfo, PlatformError>;
}
