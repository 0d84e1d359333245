//! Application Layer
//!
//! Use cases that orchestrate the deploy flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Does NOT talk to the network or filesystem directly
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `StatusPoller` - Submit a deploy and wait for it to settle
//! - `DevSession` - Watch-and-redeploy with single-flight coalescing
//! - `DeployUseCase` - One-shot deploy with debugging disabled

pub mod deploy;
pub mod dev;
pub mod poller;

#[cfg(test)]
pub(crate) mod testing;

pub use deploy::{DeployResult, DeployUseCase};
pub use dev::{
    ActivityFilter, CloseReport, CloseStatus, Coordinator, DevEvent, DevSession, FilterScope,
    SessionHandle,
};
pub use poller::{Deployer, StatusPoller, DEPLOYMENT_TIMEOUT};
