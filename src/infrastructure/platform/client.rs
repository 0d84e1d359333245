//! HTTP implementation of the platform ports

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    CredentialMap, ExecutionTarget, InstanceDescriptor, InstanceInfo, InstanceKey,
};
use crate::domain::ports::{DeploymentClient, LogStream};
use crate::error::PlatformError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct DeployRequest<'a> {
    instance: &'a InstanceDescriptor,
    credentials: &'a CredentialMap,
}

#[derive(Deserialize)]
struct GetInstanceResponse {
    #[serde(default)]
    instance: Option<InstanceInfo>,
}

#[derive(Serialize)]
struct DebugRequest<'a> {
    function: &'a str,
    region: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking JSON client for the deployment platform
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: Client,
    endpoint: String,
    access_key: Option<String>,
}

impl PlatformClient {
    pub fn new(endpoint: &str, access_key: Option<String>) -> Result<Self, PlatformError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("stagehand/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlatformError::Transport {
                url: endpoint.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    fn instance_url(&self, key: InstanceKey<'_>) -> String {
        self.url(&format!(
            "orgs/{}/apps/{}/stages/{}/instances/{}",
            key.org, key.app, key.stage, key.name
        ))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    fn execute(&self, request: RequestBuilder, url: &str) -> Result<String, PlatformError> {
        let response = self
            .authorized(request)
            .send()
            .map_err(|e| PlatformError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| PlatformError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status.as_u16(), status.canonical_reason(), &body))
        }
    }

    fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, PlatformError> {
        let body = self.execute(request, url)?;
        serde_json::from_str(&body).map_err(|e| PlatformError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn post_debug(&self, action: &str, target: &ExecutionTarget) -> Result<(), PlatformError> {
        let url = self.url(&format!("debug/{action}"));
        let body = DebugRequest {
            function: &target.function,
            region: &target.region,
        };
        self.execute(self.http.post(&url).json(&body), &url)?;
        Ok(())
    }
}

/// Map a non-success response to an error, preferring the platform's message
fn status_error(status: u16, reason: Option<&str>, body: &str) -> PlatformError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    PlatformError::Status { status, message }
}

impl DeploymentClient for PlatformClient {
    fn deploy(
        &self,
        instance: &InstanceDescriptor,
        credentials: &CredentialMap,
    ) -> Result<(), PlatformError> {
        let url = self.url("instances/deploy");
        tracing::debug!(%url, instance = %instance.name, "submitting deploy");
        let body = DeployRequest {
            instance,
            credentials,
        };
        self.execute(self.http.post(&url).json(&body), &url)?;
        Ok(())
    }

    fn get_instance(&self, key: InstanceKey<'_>) -> Result<InstanceInfo, PlatformError> {
        let url = self.instance_url(key);
        let response: GetInstanceResponse = self.execute_json(self.http.get(&url), &url)?;
        response.instance.ok_or_else(|| PlatformError::Decode {
            url,
            message: "response has no instance".to_string(),
        })
    }
}

impl LogStream for PlatformClient {
    fn start(&self, target: &ExecutionTarget) -> Result<(), PlatformError> {
        self.post_debug("start", target)
    }

    fn stop(&self, target: &ExecutionTarget) -> Result<(), PlatformError> {
        self.post_debug("stop", target)
    }
}
