//! Instance source port
//!
//! Dev mode re-reads the instance file before every change-triggered deploy.

use crate::domain::entities::InstanceDescriptor;
use crate::error::ConfigResult;

pub trait InstanceSource: Send + Sync {
    fn load(&self) -> ConfigResult<InstanceDescriptor>;
}
