// Mapping of a single NDJSON record onto a DecodedEvent

use serde_json::Value;

use crate::events::DecodedEvent;

/// Parse one complete record.
///
/// Returns `None` for blank input and for valid JSON carrying neither a
/// truthy `response` nor a truthy `error` field.
pub fn parse_record(line: &str) -> Option<DecodedEvent> {
    if line.trim().is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Error parsing stream record: {}", e);
            return Some(DecodedEvent::parse_failure());
        }
    };

    if let Some(text) = truthy_field(&value, "response") {
        return Some(DecodedEvent::Content { text });
    }

    if let Some(message) = truthy_field(&value, "error") {
        return Some(DecodedEvent::Failure { message });
    }

    tracing::debug!("Dropping record without response or error field");
    None
}

fn truthy_field(value: &Value, key: &str) -> Option<String> {
    let field = value.as_object()?.get(key)?;

    match field {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field() {
        assert_eq!(
            parse_record(r#"{"response":"hello"}"#),
            Some(DecodedEvent::content("hello"))
        );
    }

    #[test]
    fn test_response_wins_over_error() {
        assert_eq!(
            parse_record(r#"{"response":"a","error":"b"}"#),
            Some(DecodedEvent::content("a"))
        );
    }

    #[test]
    fn test_empty_response_falls_through_to_error() {
        assert_eq!(
            parse_record(r#"{"response":"","error":"quota"}"#),
            Some(DecodedEvent::failure("quota"))
        );
    }

    #[test]
    fn test_falsy_fields_dropped() {
        assert_eq!(parse_record(r#"{"response":null}"#), None);
        assert_eq!(parse_record(r#"{"error":false}"#), None);
        assert_eq!(parse_record(r#"{"response":0}"#), None);
    }

    #[test]
    fn test_non_string_truthy_rendered() {
        assert_eq!(
            parse_record(r#"{"response":42}"#),
            Some(DecodedEvent::content("42"))
        );
    }

    #[test]
    fn test_non_object_json_dropped() {
        assert_eq!(parse_record("[1,2,3]"), None);
        assert_eq!(parse_record("\"just a string\""), None);
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse_record("{oops"), Some(DecodedEvent::parse_failure()));
    }

    #[test]
    fn test_blank() {
        assert_eq!(parse_record("   \t"), None);
    }
}
