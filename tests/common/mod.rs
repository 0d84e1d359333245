//! Common test utilities for Stagehand CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and home directories plus CLI helpers
//! - `FakePlatform`: A scripted local HTTP platform
//! - Fixtures: Reusable instance files

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod platform;

pub use env::*;
pub use fixtures::*;
pub use platform::*;
