//! Instance files used across CLI tests

pub const INSTANCE_YAML: &str = r#"org: acme
app: shop
stage: dev
name: api
component: express
inputs:
  src: ./src
  region: ${env:DEPLOY_REGION}
"#;

pub const MISSING_COMPONENT_YAML: &str = "org: acme\nname: api\n";

pub const NO_ORG_YAML: &str = "name: api\ncomponent: express\n";

/// Instance record returned by the fake platform
pub fn instance_record(status: &str) -> serde_json::Value {
    serde_json::json!({
        "instanceName": "api",
        "instanceStatus": status,
        "outputs": { "url": "https://api.example.com" },
        "state": { "lambdaArn": "arn:aws:lambda:us-east-1:1:function:api", "region": "us-east-1" }
    })
}

pub fn failed_record(message: &str, stack: &str) -> serde_json::Value {
    serde_json::json!({
        "instanceName": "api",
        "instanceStatus": "error",
        "deploymentError": message,
        "deploymentErrorStack": stack
    })
}
