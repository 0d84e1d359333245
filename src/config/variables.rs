//! `${env:NAME}` resolution inside instance inputs
//!
//! Only `env` references are resolved here. Other `${...}` references are left
//! untouched for the deployment engine.

use serde_json::Value;

const ENV_PREFIX: &str = "${env:";

/// Upper bound on re-resolution passes (values may themselves contain references)
const MAX_PASSES: usize = 10;

/// Replace every `${env:NAME}` in string leaves of `inputs`.
///
/// Unset variables resolve to an empty string.
pub fn resolve_input_variables(inputs: Value, env: &impl Fn(&str) -> Option<String>) -> Value {
    let mut current = inputs;
    for _ in 0..MAX_PASSES {
        let mut resolved_any = false;
        current = resolve_value(current, env, &mut resolved_any);
        if !resolved_any {
            break;
        }
    }
    current
}

fn resolve_value(
    value: Value,
    env: &impl Fn(&str) -> Option<String>,
    resolved_any: &mut bool,
) -> Value {
    match value {
        Value::String(s) => match resolve_str(&s, env) {
            Some(resolved) => {
                *resolved_any = true;
                Value::String(resolved)
            }
            None => Value::String(s),
        },
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| resolve_value(v, env, resolved_any))
                .collect(),
        ),
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(k, v)| (k, resolve_value(v, env, resolved_any)))
                .collect(),
        ),
        other => other,
    }
}

/// Resolve one string. Returns `None` when it holds no env reference.
fn resolve_str(input: &str, env: &impl Fn(&str) -> Option<String>) -> Option<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut changed = false;

    while let Some(start) = rest.find(ENV_PREFIX) {
        let after = &rest[start + ENV_PREFIX.len()..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if name.is_empty() || !name.chars().all(is_name_char) {
            out.push_str(&rest[..start + ENV_PREFIX.len()]);
            rest = after;
            continue;
        }

        out.push_str(&rest[..start]);
        out.push_str(&env(name).unwrap_or_default());
        rest = &after[end + 1..];
        changed = true;
    }

    if !changed {
        return None;
    }
    out.push_str(rest);
    Some(out)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}
