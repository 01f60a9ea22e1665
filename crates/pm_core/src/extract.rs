//! Best-effort recovery of a JSON value from a model reply.
//!
//! Models wrap JSON in markdown fences or surround it with prose. The
//! extractor tries, in order:
//!
//! 1. strip a surrounding triple-backtick fence (and a `json` tag after it),
//! 2. parse the whole cleaned text,
//! 3. parse the first balanced `{ ... }` span found by brace counting.
//!
//! Known limitations: only the first balanced object is ever tried, and the
//! brace counter does not understand string literals, so a `{` or `}` inside
//! a quoted value can throw the span off.

use serde_json::Value;

use crate::error::ParseFailure;

const FENCE: &str = "```";

pub fn extract_json(text: &str) -> std::result::Result<Value, ParseFailure> {
    let cleaned = strip_fence(text);

    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Ok(value);
    }

    let start = cleaned.find('{').ok_or(ParseFailure::NoObject)?;
    let candidate = balanced_object(&cleaned[start..]).ok_or(ParseFailure::Unparseable)?;

    serde_json::from_str::<Value>(candidate).map_err(|e| {
        tracing::debug!("Balanced candidate did not parse: {}", e);
        ParseFailure::Unparseable
    })
}

fn strip_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !(trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE)) {
        return trimmed;
    }

    let inner = trimmed.trim_matches('`').trim();
    match inner.strip_prefix("json") {
        Some(rest) => rest.trim(),
        None => inner,
    }
}

/// Returns the prefix of `text` (which must start with `{`) up to the brace
/// that brings the depth back to zero.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_object() {
        let value = extract_json(r#"{"title": "T", "abstract": "A"}"#).unwrap();
        assert_eq!(value, json!({"title": "T", "abstract": "A"}));
    }

    #[test]
    fn test_fenced_with_and_without_tag() {
        let expected = json!({"email_subject": "S", "email_body": "B"});

        let tagged = "```json\n{\"email_subject\":\"S\",\"email_body\":\"B\"}\n```";
        assert_eq!(extract_json(tagged).unwrap(), expected);

        let untagged = "```\n{\"email_subject\":\"S\",\"email_body\":\"B\"}\n```";
        assert_eq!(extract_json(untagged).unwrap(), expected);

        let padded = "  \n```json {\"email_subject\":\"S\",\"email_body\":\"B\"} ```\n\n";
        assert_eq!(extract_json(padded).unwrap(), expected);
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let text = "Sure! Here is the topic:\n{\"title\": \"Soil\", \"meta\": {\"n\": 1}}\nLet me know.";
        let value = extract_json(text).unwrap();
        assert_eq!(value, json!({"title": "Soil", "meta": {"n": 1}}));
    }

    #[test]
    fn test_non_object_json_is_returned() {
        assert_eq!(extract_json("[1, 2]").unwrap(), json!([1, 2]));
        assert_eq!(extract_json("\"OUTLINE\"").unwrap(), json!("OUTLINE"));
    }

    #[test]
    fn test_no_object() {
        assert_eq!(extract_json("no json here"), Err(ParseFailure::NoObject));
        assert_eq!(extract_json(""), Err(ParseFailure::NoObject));
        assert_eq!(
            ParseFailure::NoObject.to_string(),
            "No JSON object found"
        );
    }

    #[test]
    fn test_unclosed_object() {
        assert_eq!(
            extract_json("here: {\"title\": \"T\""),
            Err(ParseFailure::Unparseable)
        );
        assert_eq!(
            ParseFailure::Unparseable.to_string(),
            "Unable to parse JSON from response text"
        );
    }

    #[test]
    fn test_only_first_balanced_object_is_tried() {
        // First span is balanced but invalid; the valid second object is never reached.
        let text = "prefix {not json} then {\"title\": \"T\"}";
        assert_eq!(extract_json(text), Err(ParseFailure::Unparseable));
    }

    #[test]
    fn test_brace_inside_string_misbalances() {
        let text = "reply: {\"title\": \"a } b\", \"abstract\": \"x\"} done";
        assert_eq!(extract_json(text), Err(ParseFailure::Unparseable));
    }

    #[test]
    fn test_fence_requires_both_ends() {
        let text = "```json\n{\"title\": \"T\"}";
        // Not stripped as a fence, but the brace scan still recovers the object.
        assert_eq!(extract_json(text).unwrap(), json!({"title": "T"}));
    }
}
