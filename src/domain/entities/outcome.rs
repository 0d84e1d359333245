//! Deployment outcome - what the platform reports once a deploy settles

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Remote instance status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceStatus {
    Deploying,
    Active,
    Error,
    /// Anything the platform sends that we do not recognize
    Unknown(String),
}

impl InstanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InstanceStatus::Deploying => "deploying",
            InstanceStatus::Active => "active",
            InstanceStatus::Error => "error",
            InstanceStatus::Unknown(other) => other,
        }
    }

    /// `deploying` is the only status that keeps the poller going
    pub fn is_settled(&self) -> bool {
        !matches!(self, InstanceStatus::Deploying)
    }
}

impl From<String> for InstanceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "deploying" => InstanceStatus::Deploying,
            "active" => InstanceStatus::Active,
            "error" => InstanceStatus::Error,
            _ => InstanceStatus::Unknown(value),
        }
    }
}

impl From<InstanceStatus> for String {
    fn from(value: InstanceStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the instance's code runs; used to attach remote log/debug streaming
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionTarget {
    pub function: String,
    pub region: String,
}

/// Runtime state block returned by the platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    #[serde(default, alias = "lambdaArn")]
    pub function: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl InstanceState {
    pub fn execution_target(&self) -> Option<ExecutionTarget> {
        match (&self.function, &self.region) {
            (Some(function), Some(region)) if !function.is_empty() && !region.is_empty() => {
                Some(ExecutionTarget {
                    function: function.clone(),
                    region: region.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Instance record as returned by `getInstance`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceInfo {
    #[serde(default)]
    pub instance_name: Option<String>,
    #[serde(default)]
    pub instance_status: Option<InstanceStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: InstanceState,
    #[serde(default)]
    pub deployment_error: Option<String>,
    #[serde(default)]
    pub deployment_error_stack: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a deployment ended in `error`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentFailure {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl DeploymentFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Prefer the full trace over the bare message
    pub fn detail(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

/// Settled result of one deploy, as seen by the rest of the program.
///
/// Failures are carried here instead of as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentOutcome {
    pub instance_name: String,
    pub status: InstanceStatus,
    pub outputs: Map<String, Value>,
    pub target: Option<ExecutionTarget>,
    pub error: Option<DeploymentFailure>,
}

impl DeploymentOutcome {
    /// Build an outcome from the last instance record the platform returned
    pub fn from_info(fallback_name: &str, info: InstanceInfo) -> Self {
        let status = info
            .instance_status
            .unwrap_or_else(|| InstanceStatus::Unknown(String::new()));
        let error = if status == InstanceStatus::Error {
            Some(DeploymentFailure {
                message: info
                    .deployment_error
                    .unwrap_or_else(|| "deployment failed".to_string()),
                stack: info.deployment_error_stack,
            })
        } else {
            None
        };
        Self {
            instance_name: info
                .instance_name
                .unwrap_or_else(|| fallback_name.to_string()),
            status,
            target: info.state.execution_target(),
            outputs: info.outputs,
            error,
        }
    }

    /// Force this outcome to `error`, keeping whatever was already known
    pub fn into_failed(mut self, cause: impl fmt::Display) -> Self {
        self.status = InstanceStatus::Error;
        self.error = Some(DeploymentFailure::new(cause.to_string()));
        self
    }

    /// An `error` outcome for a deploy that never produced an instance record
    pub fn failed(instance_name: &str, cause: impl fmt::Display) -> Self {
        Self {
            instance_name: instance_name.to_string(),
            status: InstanceStatus::Error,
            outputs: Map::new(),
            target: None,
            error: Some(DeploymentFailure::new(cause.to_string())),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == InstanceStatus::Active
    }
}
