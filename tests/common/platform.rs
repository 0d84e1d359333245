//! Scripted stand-in for the deployment platform, backed by `wiremock`.

use serde_json::{json, Value};
use wiremock::matchers::{any, header, method, path, path_regex};
use wiremock::{Match, Mock, MockBuilder, MockServer, ResponseTemplate};

const DEPLOY_PATH: &str = "/instances/deploy";
const INSTANCE_PATH: &str = r"^/orgs/[^/]+/apps/[^/]+/stages/[^/]+/instances/[^/]+$";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

pub struct FakePlatform {
    server: MockServer,
    bearer: Option<String>,
}

impl FakePlatform {
    /// Serve the given instance records in order; the last one repeats.
    pub async fn start(instances: Vec<Value>) -> Self {
        let platform = Self {
            server: MockServer::start().await,
            bearer: None,
        };
        platform.mount_routes(instances).await;
        platform
    }

    /// Like [`FakePlatform::start`], but every route only answers requests
    /// carrying `Authorization: Bearer <access_key>`. Anything else gets 401.
    pub async fn requiring_bearer(access_key: &str, instances: Vec<Value>) -> Self {
        let platform = Self {
            server: MockServer::start().await,
            bearer: Some(format!("Bearer {access_key}")),
        };
        platform.mount_routes(instances).await;

        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "unauthorized" })),
            )
            .with_priority(u8::MAX)
            .mount(&platform.server)
            .await;
        platform
    }

    /// Reject every deploy submission with `status`
    pub async fn rejecting(status: u16, message: &str) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(DEPLOY_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .mount(&server)
            .await;
        Self {
            server,
            bearer: None,
        }
    }

    /// Request matcher for one route, including the bearer check when required
    fn given(&self, verb: &str, route: impl Match + 'static) -> MockBuilder {
        let builder = Mock::given(method(verb)).and(route);
        match &self.bearer {
            Some(bearer) => builder.and(header("authorization", bearer.as_str())),
            None => builder,
        }
    }

    async fn mount_routes(&self, instances: Vec<Value>) {
        self.given("POST", path(DEPLOY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&self.server)
            .await;

        for debug in ["/debug/start", "/debug/stop"] {
            self.given("POST", path(debug))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .mount(&self.server)
                .await;
        }

        // Earlier records answer one poll each; the last keeps answering.
        let last = instances.len().saturating_sub(1);
        for (i, instance) in instances.into_iter().enumerate() {
            let mock = self
                .given("GET", path_regex(INSTANCE_PATH))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "instance": instance })),
                );
            let mock = if i < last { mock.up_to_n_times(1) } else { mock };
            mock.mount(&self.server).await;
        }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| RecordedRequest {
                method: request.method.to_string(),
                path: request.url.path().to_string(),
                body: String::from_utf8_lossy(&request.body).to_string(),
            })
            .collect()
    }

    pub async fn requests_to(&self, suffix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.path.ends_with(suffix))
            .collect()
    }
}
