//! Remote log/debug streaming port
//!
//! Dev mode attaches a live log and debug session to the deployed function
//! after every successful deploy, and detaches it on teardown.

use crate::domain::entities::ExecutionTarget;
use crate::error::PlatformError;

pub trait LogStream: Send + Sync {
    fn start(&self, target: &ExecutionTarget) -> Result<(), PlatformError>;

    fn stop(&self, target: &ExecutionTarget) -> Result<(), PlatformError>;
}

/// For platforms without remote debugging
pub struct NoopLogStream;

impl LogStream for NoopLogStream {
    fn start(&self, _target: &ExecutionTarget) -> Result<(), PlatformError> {
        Ok(())
    }

    fn stop(&self, _target: &ExecutionTarget) -> Result<(), PlatformError> {
        Ok(())
    }
}
