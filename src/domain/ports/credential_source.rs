//! Credential source port
//!
//! A source answers "what is the value of this variable?" for one origin:
//! the process environment or a dot-env file.

pub trait CredentialSource {
    /// Short label used in diagnostics
    fn name(&self) -> &str;

    fn lookup(&self, key: &str) -> Option<String>;
}
