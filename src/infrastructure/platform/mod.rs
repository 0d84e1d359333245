//! Deployment platform access over HTTP

mod client;

pub use client::PlatformClient;
