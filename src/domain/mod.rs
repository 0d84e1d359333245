//! Domain Layer
//!
//! Pure types and interfaces for the deploy workflow.
//!
//! - `entities/` - Instance descriptor, credentials, deployment outcome
//! - `ports/` - Interfaces for the platform, clock and configuration sources
//!
//! This layer never touches the file system or network directly.

pub mod entities;
pub mod ports;
