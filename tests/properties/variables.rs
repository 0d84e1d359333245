//! Property tests for `${env:NAME}` resolution in instance inputs.

use proptest::prelude::*;
use serde_json::{json, Value};

use stagehand::config::resolve_input_variables;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Z0-9_]{0,12}").unwrap()
}

fn plain_text() -> impl Strategy<Value = String> {
    // No `$` so the text never forms a reference by itself
    proptest::string::string_regex("[A-Za-z0-9 _:/.\\-]{0,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Inputs without references come back unchanged.
    #[test]
    fn property_plain_inputs_are_untouched(
        values in proptest::collection::vec(plain_text(), 0..6),
        flag in any::<bool>(),
        count in any::<i32>(),
    ) {
        let inputs = json!({ "values": values, "flag": flag, "count": count });
        let resolved = resolve_input_variables(inputs.clone(), &|_: &str| Some("x".to_string()));
        prop_assert_eq!(resolved, inputs);
    }

    /// PROPERTY: A reference embedded in text is replaced by the variable's value.
    #[test]
    fn property_embedded_reference_is_substituted(
        prefix in plain_text(),
        suffix in plain_text(),
        var in name(),
        value in plain_text(),
    ) {
        let inputs = json!({ "k": format!("{prefix}${{env:{var}}}{suffix}") });
        let expected = value.clone();
        let resolved = resolve_input_variables(inputs, &|key: &str| {
            (key == var).then(|| expected.clone())
        });
        prop_assert_eq!(resolved, json!({ "k": format!("{prefix}{value}{suffix}") }));
    }

    /// PROPERTY: Unset variables resolve to an empty string and never panic.
    #[test]
    fn property_unset_reference_is_empty(var in name(), nested in any::<bool>()) {
        let reference = Value::String(format!("${{env:{var}}}"));
        let inputs = if nested {
            json!({ "outer": { "list": [reference] } })
        } else {
            json!({ "k": reference })
        };
        let resolved = resolve_input_variables(inputs, &|_: &str| None);
        let leaf = if nested {
            resolved["outer"]["list"][0].clone()
        } else {
            resolved["k"].clone()
        };
        prop_assert_eq!(leaf, json!(""));
    }
}
