//! Dev mode events for the terminal and NDJSON output

use serde::Serialize;
use serde_json::{Map, Value};

use super::coordinator::{CloseStatus, DeployReason};
use super::filter::ActivityFilter;

/// Dev event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DevEvent {
    /// Watcher established
    Started {
        instance: String,
        directory: String,
        filter: ActivityFilter,
    },
    /// Status line changed
    Status { label: String },
    /// A watched file changed
    FileChanged { path: String },
    /// Deploy submitted
    DeployStarted { reason: DeployReason },
    /// Deploy settled `active`
    Deployed {
        instance: String,
        outputs: Map<String, Value>,
    },
    /// Deploy settled `error`
    DeployFailed { instance: String, detail: String },
    /// Deploy settled with a status the platform should not have sent
    UnknownStatus { instance: String, status: String },
    /// Remote log/debug streaming could not be attached or detached
    StreamWarning { message: String },
    /// Back to waiting for changes
    Watching,
    /// Session over
    Closed { status: CloseStatus, message: String },
}

impl DevEvent {
    /// Convert to JSON string with "command": "dev" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("dev"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}
