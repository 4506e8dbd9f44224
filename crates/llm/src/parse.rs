use scenescribe_common::{Result, ScenescribeError};
use serde_json::Value;
use tracing::debug;

use crate::types::{Scene, SceneMap};

/// Parse model output into a [`SceneMap`]
///
/// The text must be a JSON object whose values are all strings. A Markdown
/// code fence around the object is tolerated. On failure the raw text is
/// kept in the returned error.
pub fn parse_scene_map(text: &str) -> Result<SceneMap> {
    let body = strip_code_fence(text.trim());

    let object = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object,
        Ok(other) => {
            return Err(ScenescribeError::parse(
                format!("expected a mapping, found {}", value_kind(&other)),
                text,
            ))
        }
        Err(e) => return Err(ScenescribeError::parse(e.to_string(), text)),
    };

    let mut scenes = Vec::with_capacity(object.len());
    for (time_range, value) in object {
        match value {
            Value::String(summary) => scenes.push(Scene { time_range, summary }),
            other => {
                return Err(ScenescribeError::parse(
                    format!(
                        "value for \"{}\" is {}, expected a string",
                        time_range,
                        value_kind(&other)
                    ),
                    text,
                ))
            }
        }
    }

    debug!("Parsed {} scenes", scenes.len());
    Ok(SceneMap { scenes })
}

/// Remove a surrounding ``` fence, with or without a language tag
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return text;
    };
    // Skip the language tag line (```json)
    match inner.split_once('\n') {
        Some((tag, rest)) if !tag.trim_start().starts_with('{') => rest.trim(),
        _ => inner.trim(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping() {
        let map = parse_scene_map(r#"{"120-145": "Intro scene"}"#).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("120-145"), Some("Intro scene"));
    }

    #[test]
    fn test_not_a_mapping() {
        let err = parse_scene_map("not a mapping").unwrap_err();
        assert!(matches!(err, ScenescribeError::Parse { .. }));
        assert_eq!(err.raw_response(), Some("not a mapping"));
    }

    #[test]
    fn test_preserves_model_order() {
        let map = parse_scene_map(r#"{"280-300": "Second", "120-145": "First"}"#).unwrap();
        let ranges: Vec<_> = map.iter().map(|s| s.time_range.as_str()).collect();
        assert_eq!(ranges, vec!["280-300", "120-145"]);
    }

    #[test]
    fn test_rejects_non_string_values() {
        let err = parse_scene_map(r#"{"120-145": 3}"#).unwrap_err();
        assert!(matches!(err, ScenescribeError::Parse { .. }));
    }

    #[test]
    fn test_rejects_array() {
        let err = parse_scene_map(r#"["120-145", "Intro"]"#).unwrap_err();
        assert!(matches!(err, ScenescribeError::Parse { .. }));
    }

    #[test]
    fn test_rejects_python_literal_syntax() {
        let err = parse_scene_map("{'120-145': 'Intro scene'}").unwrap_err();
        assert!(matches!(err, ScenescribeError::Parse { .. }));
    }

    #[test]
    fn test_code_fence() {
        let text = "```json\n{\"0-20\": \"Cold open\"}\n```";
        let map = parse_scene_map(text).unwrap();
        assert_eq!(map.get("0-20"), Some("Cold open"));

        let bare = "```\n{\"0-20\": \"Cold open\"}\n```";
        assert_eq!(parse_scene_map(bare).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_object() {
        assert!(parse_scene_map("{}").unwrap().is_empty());
    }
}
