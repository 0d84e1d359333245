//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `credentials` - Process environment and dot-env credential sources
//! - `platform/` - HTTP client for the deployment platform
//! - `watch` - Filesystem watch subscription

pub mod credentials;
pub mod platform;
pub mod watch;

pub use credentials::{load_instance_credentials, DotEnvFile, ProcessEnv};
pub use platform::PlatformClient;
pub use watch::{subscribe, FsWatch, WatchFilter};
