//! Recovery of JSON payloads from free-form model output.
//!
//! Models wrap their answers in markdown fences, use typographic quotes,
//! leave trailing commas and sometimes stop mid-array. The extractors here
//! tolerate all of that and return `None` only when no parseable payload
//! can be recovered.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static ARRAY_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\s*\{").expect("invalid array start regex"));
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("invalid trailing comma regex"));

fn strip_fences(raw: &str) -> String {
    let cleaned = raw.replace("```json", "").replace("```", "");
    if cleaned.trim().is_empty() {
        raw.to_owned()
    } else {
        cleaned
    }
}

fn repair(fragment: &str) -> String {
    let ascii_quoted = fragment
        .trim()
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    TRAILING_COMMA.replace_all(&ascii_quoted, "$1").into_owned()
}

/// Pulls a JSON array of objects out of raw model output.
///
/// Everything from the first `[{` to the end of the text is taken, repaired
/// and parsed; a missing closing bracket is appended before the attempt.
#[must_use]
pub fn extract_json_array(raw: &str) -> Option<Value> {
    let cleaned = strip_fences(raw);

    let Some(found) = ARRAY_START.find(&cleaned) else {
        tracing::warn!("no JSON-like array found in model output");
        return None;
    };

    let mut json = repair(&cleaned[found.start()..]);
    if !json.ends_with(']') {
        json.push(']');
    }

    match serde_json::from_str::<Value>(&json) {
        Ok(value) if value.is_array() => Some(value),
        Ok(_) => {
            tracing::warn!("recovered JSON is not an array");
            None
        }
        Err(error) => {
            tracing::warn!(error = &error as &dyn std::error::Error, "could not recover JSON array");
            None
        }
    }
}

/// Pulls a single JSON object out of raw model output, taking everything
/// from the first `{` to the last `}`.
#[must_use]
pub fn extract_json_value(raw: &str) -> Option<Value> {
    let cleaned = strip_fences(raw);

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }

    let json = repair(&cleaned[start..=end]);

    match serde_json::from_str::<Value>(&json) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(error = &error as &dyn std::error::Error, "could not recover JSON object");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_array_passes_through() {
        let raw = r#"[{"q": "What?", "a": "That."}]"#;
        assert_eq!(extract_json_array(raw), Some(json!([{"q": "What?", "a": "That."}])));
    }

    #[test]
    fn test_markdown_fences_are_stripped() {
        let raw = "Here you go:\n```json\n[{\"q\": \"a\", \"a\": \"b\"}]\n```";
        assert_eq!(extract_json_array(raw), Some(json!([{"q": "a", "a": "b"}])));
    }

    #[test]
    fn test_trailing_commas_are_removed() {
        let raw = r#"[{"q": "a", "a": "b",}, ]"#;
        assert_eq!(extract_json_array(raw), Some(json!([{"q": "a", "a": "b"}])));
    }

    #[test]
    fn test_smart_quotes_become_ascii() {
        let raw = "[{\u{201c}q\u{201d}: \u{201c}a\u{201d}, \u{201c}a\u{201d}: \u{201c}b\u{201d}}]";
        assert_eq!(extract_json_array(raw), Some(json!([{"q": "a", "a": "b"}])));
    }

    #[test]
    fn test_missing_closing_bracket_is_appended() {
        let raw = r#"[{"q": "a", "a": "b"}"#;
        assert_eq!(extract_json_array(raw), Some(json!([{"q": "a", "a": "b"}])));
    }

    #[test]
    fn test_garbage_yields_none() {
        assert_eq!(extract_json_array("the model refuses to answer"), None);
        assert_eq!(extract_json_array("[{ definitely not json"), None);
    }

    #[test]
    fn test_object_extraction_skips_prose() {
        let raw = "Sure! Here is your quiz:\n{\"topics\": [\"Math\"]}\nEnjoy!";
        assert_eq!(extract_json_value(raw), Some(json!({"topics": ["Math"]})));
    }

    #[test]
    fn test_object_extraction_garbage_yields_none() {
        assert_eq!(extract_json_value("no braces here"), None);
    }
}
