use serde_json::{Map, Value};

use crate::core::errors::ApiError;

/// Expected shape of one config key.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// String or null.
    Text,
    Flag,
    Int { min: u64, max: u64 },
    /// Array of non-blank strings.
    TextList,
}

/// Every recognised key, as (section, key, rule). Unknown keys are ignored.
const RULES: [(&str, &str, Rule); 9] = [
    ("server", "host", Rule::Text),
    ("server", "port", Rule::Int { min: 1, max: 65_535 }),
    ("server", "cors_allowed_origins", Rule::TextList),
    ("knowledge", "db_path", Rule::Text),
    ("knowledge", "seed_sample_data", Rule::Flag),
    ("chat", "max_query_chars", Rule::Int { min: 1, max: 100_000 }),
    ("generation", "base_url", Rule::Text),
    ("generation", "model", Rule::Text),
    ("generation", "api_key", Rule::Text),
];

/// Type and range checks over the merged config. Absent keys are fine.
pub fn validate_config(config: &Value) -> Result<(), ApiError> {
    let root = config
        .as_object()
        .ok_or_else(|| invalid("root", "expected object"))?;

    for (section_name, key, rule) in RULES {
        let Some(table) = section(root, section_name)? else {
            continue;
        };
        if let Some(value) = table.get(key) {
            check(&format!("{section_name}.{key}"), value, rule)?;
        }
    }

    Ok(())
}

fn section<'a>(
    root: &'a Map<String, Value>,
    name: &str,
) -> Result<Option<&'a Map<String, Value>>, ApiError> {
    match root.get(name) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(invalid(name, "expected object")),
    }
}

fn check(path: &str, value: &Value, rule: Rule) -> Result<(), ApiError> {
    match (rule, value) {
        (Rule::Text, Value::Null | Value::String(_)) => Ok(()),
        (Rule::Text, _) => Err(invalid(path, "expected string")),
        (Rule::Flag, Value::Bool(_)) => Ok(()),
        (Rule::Flag, _) => Err(invalid(path, "expected boolean")),
        (Rule::Int { min, max }, _) => match value.as_u64() {
            Some(n) if (min..=max).contains(&n) => Ok(()),
            Some(_) => Err(invalid(path, &format!("must be between {min} and {max}"))),
            None => Err(invalid(path, "expected integer")),
        },
        (Rule::TextList, Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(text) if !text.trim().is_empty() => {}
                    Some(_) => return Err(invalid(&format!("{path}[{index}]"), "value cannot be empty")),
                    None => return Err(invalid(&format!("{path}[{index}]"), "expected string")),
                }
            }
            Ok(())
        }
        (Rule::TextList, _) => Err(invalid(path, "expected array of strings")),
    }
}

fn invalid(path: &str, reason: &str) -> ApiError {
    ApiError::BadRequest(format!("Invalid config at '{path}': {reason}"))
}
