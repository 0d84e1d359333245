//! One-shot deploy
//!
//! Deploys the instance once with remote debugging disabled and detaches any
//! log stream a previous dev session left behind. This is the command the
//! dev-mode cancel message points users at.

use crate::domain::entities::{CredentialMap, DeploymentOutcome, InstanceDescriptor};
use crate::domain::ports::LogStream;

use super::poller::Deployer;

/// Result of a one-shot deploy
#[derive(Debug, Clone)]
pub struct DeployResult {
    pub outcome: DeploymentOutcome,
    /// Non-fatal problems detaching the log stream
    pub warnings: Vec<String>,
}

impl DeployResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_active()
    }
}

pub struct DeployUseCase<'a> {
    deployer: &'a dyn Deployer,
    log_stream: &'a dyn LogStream,
}

impl<'a> DeployUseCase<'a> {
    pub fn new(deployer: &'a dyn Deployer, log_stream: &'a dyn LogStream) -> Self {
        Self {
            deployer,
            log_stream,
        }
    }

    pub fn execute(&self, instance: &InstanceDescriptor, credentials: &CredentialMap) -> DeployResult {
        tracing::info!(instance = %instance.name, stage = %instance.stage, "deploying");
        let outcome = self.deployer.deploy(instance, credentials);
        let mut warnings = Vec::new();

        if outcome.is_active() {
            if let Some(target) = &outcome.target {
                if let Err(e) = self.log_stream.stop(target) {
                    tracing::warn!(function = %target.function, "failed to stop log stream: {e}");
                    warnings.push(format!("could not stop remote log stream: {e}"));
                }
            }
        }

        DeployResult { outcome, warnings }
    }
}
