//! Provider credentials resolved from environment-like sources

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ports::CredentialSource;

/// Well-known environment variables per provider, mapped to the field name the
/// provider's SDK expects.
pub const PROVIDER_ENV_VARS: &[(&str, &[(&str, &str)])] = &[
    (
        "aws",
        &[
            ("AWS_ACCESS_KEY_ID", "accessKeyId"),
            ("AWS_SECRET_ACCESS_KEY", "secretAccessKey"),
            ("AWS_REGION", "region"),
        ],
    ),
    (
        "google",
        &[
            ("GOOGLE_APPLICATION_CREDENTIALS", "applicationCredentials"),
            ("GOOGLE_PROJECT_ID", "projectId"),
            ("GOOGLE_CLIENT_EMAIL", "clientEmail"),
            ("GOOGLE_PRIVATE_KEY", "privateKey"),
        ],
    ),
    (
        "tencent",
        &[
            ("TENCENT_APP_ID", "AppId"),
            ("TENCENT_SECRET_ID", "SecretId"),
            ("TENCENT_SECRET_KEY", "SecretKey"),
            ("TENCENT_TOKEN", "Token"),
        ],
    ),
    (
        "docker",
        &[
            ("DOCKER_USERNAME", "username"),
            ("DOCKER_PASSWORD", "password"),
        ],
    ),
];

/// Credential fields for one provider
pub type ProviderCredentials = BTreeMap<String, String>;

/// provider -> { credential field -> value }
///
/// Every known provider has an entry, even when none of its variables is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CredentialMap(BTreeMap<String, ProviderCredentials>);

impl CredentialMap {
    /// Resolve credentials from `sources`, most specific first.
    ///
    /// The first source that has a variable wins for that variable.
    pub fn resolve(sources: &[&dyn CredentialSource]) -> Self {
        let mut providers = BTreeMap::new();
        for (provider, vars) in PROVIDER_ENV_VARS {
            let mut fields = ProviderCredentials::new();
            for (env_var, field) in *vars {
                let found = sources
                    .iter()
                    .find_map(|s| s.lookup(env_var).map(|value| (s.name(), value)));
                if let Some((source, value)) = found {
                    tracing::trace!(provider, env_var, source, "credential resolved");
                    fields.insert((*field).to_string(), value);
                }
            }
            providers.insert((*provider).to_string(), fields);
        }
        Self(providers)
    }

    pub fn provider(&self, name: &str) -> Option<&ProviderCredentials> {
        self.0.get(name)
    }

    /// Providers with at least one resolved field
    pub fn configured_providers(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, fields)| !fields.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<&'static str, &'static str>);

    impl CredentialSource for MapSource {
        fn name(&self) -> &str {
            "map"
        }

        fn lookup(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn earlier_source_wins_on_conflict() {
        let process = MapSource(HashMap::from([("AWS_REGION", "us-east-1")]));
        let dotenv = MapSource(HashMap::from([
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
        ]));

        let creds = CredentialMap::resolve(&[&process, &dotenv]);
        let aws = creds.provider("aws").unwrap();
        assert_eq!(aws["region"], "us-east-1");
        assert_eq!(aws["accessKeyId"], "AKIA");
    }

    #[test]
    fn every_provider_is_present_even_when_empty() {
        let empty = MapSource(HashMap::new());
        let creds = CredentialMap::resolve(&[&empty]);
        for provider in ["aws", "google", "tencent", "docker"] {
            assert!(creds.provider(provider).unwrap().is_empty());
        }
        assert!(creds.configured_providers().is_empty());
    }

    #[test]
    fn maps_env_names_to_sdk_field_names() {
        let source = MapSource(HashMap::from([
            ("TENCENT_SECRET_ID", "sid"),
            ("DOCKER_PASSWORD", "hunter2"),
        ]));
        let creds = CredentialMap::resolve(&[&source]);
        assert_eq!(creds.provider("tencent").unwrap()["SecretId"], "sid");
        assert_eq!(creds.provider("docker").unwrap()["password"], "hunter2");
        assert_eq!(creds.configured_providers(), vec!["docker", "tencent"]);
    }
}
