pub mod deploy;
pub mod dev;
