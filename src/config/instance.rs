//! Instance file loading (`serverless.yml` / `serverless.yaml` / `serverless.json`)

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::entities::{InstanceDescriptor, DEFAULT_STAGE};
use crate::domain::ports::InstanceSource;
use crate::error::{ConfigError, ConfigResult};

use super::variables::resolve_input_variables;

/// Candidate file names, lowest precedence first
pub const INSTANCE_FILE_NAMES: [&str; 3] = ["serverless.yml", "serverless.yaml", "serverless.json"];

/// Directory name the platform writes build artifacts into
pub const BUILD_ARTIFACT_DIR: &str = ".serverless";

/// Locate the instance file in `dir`. When several exist the last candidate wins.
pub fn find_instance_file(dir: &Path) -> Option<PathBuf> {
    INSTANCE_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file())
        .last()
}

/// Outcome of parsing the instance file text
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub value: Value,
    /// Nodes kept as raw text: tagged YAML (`!Ref`, `!GetAtt`, ...) and
    /// non-finite floats
    pub raw_passthrough: usize,
}

/// Parse instance file text into a JSON document.
///
/// Strict syntax errors fail. YAML merge keys (`<<: *anchor`) are applied.
/// YAML tags this loader cannot interpret are recognized and passed through as
/// raw strings for the deployment engine.
pub fn parse_document(file: &Path, text: &str) -> ConfigResult<ParsedDocument> {
    let is_json = file
        .extension()
        .map(|ext| ext == "json")
        .unwrap_or(false);

    if is_json {
        let value = serde_json::from_str(text).map_err(|e| ConfigError::Json {
            file: file.to_path_buf(),
            message: e.to_string(),
        })?;
        return Ok(ParsedDocument {
            value,
            raw_passthrough: 0,
        });
    }

    let yaml_error = |e: serde_yaml_ng::Error| ConfigError::Yaml {
        file: file.to_path_buf(),
        message: e.to_string(),
    };
    let mut yaml: serde_yaml_ng::Value = serde_yaml_ng::from_str(text).map_err(yaml_error)?;
    yaml.apply_merge().map_err(yaml_error)?;
    let mut raw_passthrough = 0;
    let value = yaml_to_json(yaml, &mut raw_passthrough);
    if raw_passthrough > 0 {
        tracing::debug!(
            file = %file.display(),
            count = raw_passthrough,
            "passing YAML nodes through as raw text"
        );
    }
    Ok(ParsedDocument {
        value,
        raw_passthrough,
    })
}

fn yaml_to_json(value: serde_yaml_ng::Value, raw: &mut usize) -> Value {
    use serde_yaml_ng::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                match n.as_f64().and_then(serde_json::Number::from_f64) {
                    Some(number) => Value::Number(number),
                    // `.inf` / `.nan` have no JSON form
                    None => {
                        *raw += 1;
                        Value::String(n.to_string())
                    }
                }
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => {
            Value::Array(items.into_iter().map(|v| yaml_to_json(v, raw)).collect())
        }
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key(&key), yaml_to_json(value, raw));
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => {
            *raw += 1;
            let tag = tagged.tag.to_string();
            let text = serde_yaml_ng::to_string(&Yaml::Tagged(tagged))
                .map(|s| s.trim_end().to_string())
                .unwrap_or(tag);
            Value::String(text)
        }
    }
}

fn yaml_key(key: &serde_yaml_ng::Value) -> String {
    match key {
        serde_yaml_ng::Value::String(s) => s.clone(),
        other => serde_yaml_ng::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Read a string-like property. Empty strings count as missing.
fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Load and normalize the instance file in `dir`.
///
/// `default_org` is consulted only when the file names no `org`.
pub fn load_instance_config(
    dir: &Path,
    default_org: Option<&str>,
) -> ConfigResult<InstanceDescriptor> {
    load_instance_config_with_env(dir, default_org, |key| std::env::var(key).ok())
}

/// Same as [`load_instance_config`] with an injected environment lookup
pub fn load_instance_config_with_env(
    dir: &Path,
    default_org: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ConfigResult<InstanceDescriptor> {
    let file = find_instance_file(dir).ok_or_else(|| ConfigError::NotFound {
        dir: dir.to_path_buf(),
    })?;
    let text = fs::read_to_string(&file).map_err(|source| ConfigError::Io {
        file: file.clone(),
        source,
    })?;

    let document = parse_document(&file, &text)?;
    let object = match document.value {
        Value::Object(object) => object,
        Value::Null => Map::new(),
        other => {
            return Err(ConfigError::Shape {
                file,
                message: format!("expected a mapping at the top level, found {}", kind(&other)),
            })
        }
    };

    let name = string_field(&object, "name").ok_or_else(|| ConfigError::MissingField {
        field: "name",
        file: file.clone(),
    })?;
    let component =
        string_field(&object, "component").ok_or_else(|| ConfigError::MissingField {
            field: "component",
            file: file.clone(),
        })?;
    let stage = string_field(&object, "stage").unwrap_or_else(|| DEFAULT_STAGE.to_string());
    let org = string_field(&object, "org")
        .or_else(|| default_org.filter(|o| !o.is_empty()).map(str::to_string))
        .ok_or_else(|| ConfigError::MissingField {
            field: "org",
            file: file.clone(),
        })?;
    let app = string_field(&object, "app").unwrap_or_else(|| name.clone());
    let inputs = match object.get("inputs") {
        Some(inputs) => resolve_input_variables(inputs.clone(), &env),
        None => Value::Null,
    };

    tracing::debug!(file = %file.display(), %org, %app, %stage, %name, "loaded instance config");

    Ok(InstanceDescriptor {
        org,
        app,
        stage,
        name,
        component,
        inputs,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Re-reads the instance file from a fixed directory
#[derive(Debug, Clone)]
pub struct InstanceLoader {
    dir: PathBuf,
    default_org: Option<String>,
}

impl InstanceLoader {
    pub fn new(dir: impl Into<PathBuf>, default_org: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            default_org,
        }
    }
}

impl InstanceSource for InstanceLoader {
    fn load(&self) -> ConfigResult<InstanceDescriptor> {
        load_instance_config(&self.dir, self.default_org.as_deref())
    }
}
