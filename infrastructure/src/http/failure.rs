//! Failure message extraction for non-2xx responses.

use reqwest::StatusCode;
use serde_json::Value;

/// Best-effort message for a failed response.
///
/// Preference order: the body re-serialized as compact JSON, the raw body
/// text, the standard reason phrase for `status`.
pub fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        return json.to_string();
    }
    if !body.is_empty() {
        return body.to_string();
    }
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_is_reserialized() {
        let message = failure_message(StatusCode::NOT_FOUND, r#"{"message":"not found"}"#);
        assert_eq!(message, r#"{"message":"not found"}"#);
    }

    #[test]
    fn test_pretty_json_body_is_compacted() {
        let message = failure_message(
            StatusCode::BAD_REQUEST,
            "{\n  \"error\": \"invalid\",\n  \"field\": \"title\"\n}",
        );
        assert_eq!(message, r#"{"error":"invalid","field":"title"}"#);
    }

    #[test]
    fn test_text_body_is_used_verbatim() {
        let message = failure_message(StatusCode::BAD_GATEWAY, "upstream unavailable");
        assert_eq!(message, "upstream unavailable");
    }

    #[test]
    fn test_empty_body_falls_back_to_reason_phrase() {
        assert_eq!(
            failure_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(failure_message(StatusCode::UNAUTHORIZED, ""), "Unauthorized");
    }

    #[test]
    fn test_unknown_status_without_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(failure_message(status, ""), "Unknown");
    }
}
