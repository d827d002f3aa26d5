//! Prompt template helpers: placeholder discovery, filling, and input checks.

use serde_json::{Map as JsonMap, Value as JsonValue};

/// Distinct `{{key}}` tokens in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let key = after[..end].trim();
        if !key.is_empty() && !key.contains('{') && !out.iter().any(|k| k == key) {
            out.push(key.to_string());
        }
        rest = &after[end + 2..];
    }
    out
}

/// Expected placeholders no longer present in `template`.
pub fn missing_placeholders<'a>(template: &str, expected: &[&'a str]) -> Vec<&'a str> {
    let present = placeholders(template);
    expected
        .iter()
        .copied()
        .filter(|k| !present.iter().any(|p| p == k))
        .collect()
}

/// Replace each `{{key}}` with the matching input. Unknown tokens stay as-is.
pub fn fill_prompt(template: &str, inputs: &JsonMap<String, JsonValue>) -> String {
    let mut prompt = template.to_string();
    for (key, value) in inputs {
        let text = match value {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        prompt = prompt.replace(&format!("{{{{{key}}}}}"), &text);
    }
    prompt
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("input is missing required key(s): {}", .0.join(", "))]
    MissingRequired(Vec<String>),
}

/// Check `inputs` against the `required` list of an agent's input schema.
pub fn check_inputs(
    schema: &JsonValue,
    inputs: &JsonMap<String, JsonValue>,
) -> Result<(), InputError> {
    let missing: Vec<String> = schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|req| {
            req.iter()
                .filter_map(|k| k.as_str())
                .filter(|k| !inputs.contains_key(*k))
                .map(|k| k.to_string())
                .collect()
        })
        .unwrap_or_default();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InputError::MissingRequired(missing))
    }
}
