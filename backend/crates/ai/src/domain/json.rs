//! JSON extraction from model output
//!
//! Models asked for JSON still wrap it in markdown fences or a sentence
//! of prose now and then.

use serde_json::Value;

pub fn extract_json(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    if let Some(fenced) = fenced_block(text) {
        if let Ok(value) = serde_json::from_str(fenced) {
            return Some(value);
        }
    }

    outermost_span(text).and_then(|span| serde_json::from_str(span).ok())
}

/// Body of the first ``` block, without its language tag
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let rest = match rest.find('\n') {
        Some(newline) if !rest[..newline].trim_start().starts_with(['{', '[']) => {
            &rest[newline + 1..]
        }
        _ => rest,
    };
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// From the first `{`/`[` to the last matching closer
fn outermost_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let closer = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(closer)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        assert_eq!(extract_json(r#" {"a": 1} "#), Some(json!({"a": 1})));
    }

    #[test]
    fn test_fenced_json() {
        let text = "Here you go:\n```json\n{\"a\": [1, 2]}\n```\nEnjoy!";
        assert_eq!(extract_json(text), Some(json!({"a": [1, 2]})));

        let bare = "```{\"a\": 1}```";
        assert_eq!(extract_json(bare), Some(json!({"a": 1})));
    }

    #[test]
    fn test_json_in_prose() {
        let text = "The dish is {\"foodName\": \"Pho\"} I think.";
        assert_eq!(extract_json(text), Some(json!({"foodName": "Pho"})));

        let array = "Plan: [{\"day\": 1}] done";
        assert_eq!(extract_json(array), Some(json!([{"day": 1}])));
    }

    #[test]
    fn test_no_json() {
        assert_eq!(extract_json("I cannot identify this image."), None);
        assert_eq!(extract_json("} backwards {"), None);
    }
}
