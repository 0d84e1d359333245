//! Deployment outputs block
//!
//! Nested output values are printed as an indented `key: value` tree.

use serde_json::{Map, Value};

use crate::ui::primitives::text::ColoredText;

pub fn render_outputs(outputs: &Map<String, Value>, supports_color: bool) -> String {
    let mut out = String::new();
    if outputs.is_empty() {
        return out;
    }
    write_map(&mut out, outputs, 1, supports_color);
    out
}

fn write_map(out: &mut String, map: &Map<String, Value>, depth: usize, color: bool) {
    for (key, value) in map {
        write_entry(out, &format!("{key}:"), value, depth, color);
    }
}

fn write_entry(out: &mut String, label: &str, value: &Value, depth: usize, color: bool) {
    let indent = "  ".repeat(depth);
    let label = ColoredText::dim(label).render(color);
    match value {
        Value::Object(map) if !map.is_empty() => {
            out.push_str(&format!("{indent}{label}\n"));
            write_map(out, map, depth + 1, color);
        }
        Value::Array(items) if !items.is_empty() => {
            out.push_str(&format!("{indent}{label}\n"));
            for item in items {
                write_entry(out, "-", item, depth + 1, color);
            }
        }
        scalar => out.push_str(&format!("{indent}{label} {}\n", scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
        other => other.to_string(),
    }
}
