//! Instance descriptor - one deployable unit described by `serverless.yml`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stage used when the instance file does not name one
pub const DEFAULT_STAGE: &str = "dev";

const DASHBOARD_ROOT: &str = "https://dashboard.serverless.com";
const DASHBOARD_ROOT_DEV: &str = "https://dashboard.serverless-dev.com";

/// A fully normalized instance description.
///
/// Built once per load. It is never mutated after being handed to a deploy;
/// dev mode builds a fresh one on every reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceDescriptor {
    pub org: String,
    pub app: String,
    pub stage: String,
    pub name: String,
    pub component: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub inputs: Value,
}

/// Borrowed lookup key for a deployed instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceKey<'a> {
    pub org: &'a str,
    pub stage: &'a str,
    pub app: &'a str,
    pub name: &'a str,
}

impl InstanceDescriptor {
    pub fn key(&self) -> InstanceKey<'_> {
        InstanceKey {
            org: &self.org,
            stage: &self.stage,
            app: &self.app,
            name: &self.name,
        }
    }

    /// Dashboard overview page for this instance.
    ///
    /// `dev_platform` selects the platform's development dashboard.
    pub fn dashboard_url(&self, dev_platform: bool) -> String {
        let root = if dev_platform {
            DASHBOARD_ROOT_DEV
        } else {
            DASHBOARD_ROOT
        };
        format!(
            "{}/tenants/{}/applications/{}/component/{}/stage/{}/overview",
            root, self.org, self.app, self.name, self.stage
        )
    }
}
