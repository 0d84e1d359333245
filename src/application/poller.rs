//! Status Poller
//!
//! Submits a deploy and waits for the platform to settle it, bounded by a
//! fixed ceiling. Every failure on this path becomes an `error` outcome.

use std::time::Duration;

use crate::domain::entities::{CredentialMap, DeploymentOutcome, InstanceDescriptor, InstanceInfo};
use crate::domain::ports::{Clock, DeploymentClient};
use crate::error::PlatformError;

/// Ceiling on status polling after a deploy is submitted
pub const DEPLOYMENT_TIMEOUT: Duration = Duration::from_secs(24);

/// Something that turns an instance into a settled outcome.
///
/// Dev mode and the one-shot deploy depend on this rather than on the
/// platform client directly.
pub trait Deployer: Send + Sync {
    fn deploy(&self, instance: &InstanceDescriptor, credentials: &CredentialMap)
        -> DeploymentOutcome;
}

pub struct StatusPoller<C, K> {
    client: C,
    clock: K,
    poll_interval: Duration,
    timeout: Duration,
}

impl<C, K> StatusPoller<C, K>
where
    C: DeploymentClient,
    K: Clock,
{
    pub fn new(client: C, clock: K) -> Self {
        Self {
            client,
            clock,
            poll_interval: Duration::ZERO,
            timeout: DEPLOYMENT_TIMEOUT,
        }
    }

    /// Fixed delay between status polls
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit `instance` and poll until its status is no longer `deploying`.
    pub fn await_deployment(
        &self,
        instance: &InstanceDescriptor,
        credentials: &CredentialMap,
    ) -> DeploymentOutcome {
        let name = instance.name.as_str();

        if let Err(e) = self.client.deploy(instance, credentials) {
            tracing::warn!(instance = name, "deploy submission failed: {e}");
            return DeploymentOutcome::failed(name, e);
        }

        let started = self.clock.now();
        let mut last: Option<InstanceInfo> = None;
        let mut polls = 0usize;

        loop {
            polls += 1;
            match self.client.get_instance(instance.key()) {
                Ok(info) => {
                    let settled = info
                        .instance_status
                        .as_ref()
                        .map(|s| s.is_settled())
                        .unwrap_or(true);
                    if settled {
                        tracing::debug!(instance = name, polls, "deployment settled");
                        return DeploymentOutcome::from_info(name, info);
                    }
                    last = Some(info);
                }
                Err(e) => {
                    tracing::warn!(instance = name, polls, "status poll failed: {e}");
                    return failed_with(name, last, e);
                }
            }

            if self.clock.now().saturating_sub(started) > self.timeout {
                tracing::warn!(instance = name, polls, "deployment timed out");
                return failed_with(name, last, PlatformError::DeploymentTimeout);
            }

            self.clock.sleep(self.poll_interval);
        }
    }
}

fn failed_with(name: &str, last: Option<InstanceInfo>, cause: PlatformError) -> DeploymentOutcome {
    match last {
        Some(info) => DeploymentOutcome::from_info(name, info).into_failed(cause),
        None => DeploymentOutcome::failed(name, cause),
    }
}

impl<C, K> Deployer for StatusPoller<C, K>
where
    C: DeploymentClient,
    K: Clock,
{
    fn deploy(
        &self,
        instance: &InstanceDescriptor,
        credentials: &CredentialMap,
    ) -> DeploymentOutcome {
        self.await_deployment(instance, credentials)
    }
}
