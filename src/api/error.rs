use serde_json::Value;
use thiserror::Error;

/// Failure modes of the remote contact service. A structured `error` field
/// in a non-2xx body is surfaced verbatim; everything else collapses to the
/// transport or status bucket.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned HTTP {status}")]
    Server { status: u16 },
    #[error("{message}")]
    Validation { message: String },
    #[error("contact not found on server")]
    NotFound,
}

impl ApiError {
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        if let Some(message) = body.and_then(|v| v.get("error")).and_then(|v| v.as_str()) {
            return ApiError::Validation { message: message.to_string() };
        }
        if status == 404 {
            return ApiError::NotFound;
        }
        ApiError::Server { status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_error_body_becomes_validation() {
        let body = json!({"error": "name must be unique"});
        match ApiError::from_response(400, Some(&body)) {
            ApiError::Validation { message } => assert_eq!(message, "name must be unique"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn validation_message_is_verbatim_in_display() {
        let err = ApiError::Validation { message: "number too short".to_string() };
        assert_eq!(err.to_string(), "number too short");
    }

    #[test]
    fn missing_item_maps_to_not_found() {
        assert!(matches!(ApiError::from_response(404, None), ApiError::NotFound));
    }

    #[test]
    fn unstructured_failure_keeps_the_status() {
        match ApiError::from_response(500, Some(&json!({"detail": "boom"}))) {
            ApiError::Server { status } => assert_eq!(status, 500),
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn structured_body_wins_over_not_found_status() {
        let body = json!({"error": "person already removed"});
        assert!(matches!(
            ApiError::from_response(404, Some(&body)),
            ApiError::Validation { .. }
        ));
    }
}
