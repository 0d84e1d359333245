//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod clock;
pub mod credential_source;
pub mod deployment_client;
pub mod instance_source;
pub mod log_stream;

pub use clock::{Clock, SystemClock};
pub use credential_source::CredentialSource;
pub use deployment_client::DeploymentClient;
pub use instance_source::InstanceSource;
pub use log_stream::{LogStream, NoopLogStream};
