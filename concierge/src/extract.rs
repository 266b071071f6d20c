//! JSON extraction from free-form model output.
//!
//! Models are told to answer with bare JSON but routinely wrap it in
//! markdown fences or prose. The extraction takes everything from the first
//! `{` to the last `}` and strips ASCII control characters, the same
//! tolerance the service has always applied.

use serde::de::DeserializeOwned;

/// Slice out the outermost JSON object from `text`, cleaned of control
/// characters. `None` when no braces are present.
#[must_use]
pub fn extract_json(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(
        text[start..=end]
            .chars()
            .filter(|c| !c.is_ascii_control())
            .collect(),
    )
}

/// Extract and deserialize a typed payload from model output. `None` on
/// missing JSON, parse failure, or shape mismatch; callers substitute their
/// fallback payload.
#[must_use]
pub fn parse_payload<T: DeserializeOwned>(text: &str) -> Option<T> {
    let json = extract_json(text)?;
    match serde_json::from_str(&json) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::warn!(error = %e, "Model output failed to parse, using fallback");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_from_markdown_fence() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nEnjoy!";
        assert_eq!(extract_json(text).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn spans_first_brace_to_last() {
        let text = "{\"outer\": {\"inner\": 2}} trailing";
        assert_eq!(extract_json(text).unwrap(), "{\"outer\": {\"inner\": 2}}");
    }

    #[test]
    fn strips_control_characters() {
        let text = "{\"a\": \u{1}1\u{7f}}";
        assert_eq!(extract_json(text).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn none_without_braces() {
        assert!(extract_json("no json here").is_none());
        assert!(extract_json("} reversed {").is_none());
    }

    #[test]
    fn parse_payload_rejects_shape_mismatch() {
        #[derive(serde::Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            required: String,
        }
        assert!(parse_payload::<Shape>("{\"other\": 1}").is_none());
        assert!(parse_payload::<Shape>("{\"required\": \"x\"}").is_some());
    }
}
