//! Error taxonomy for the API gateway client
//!
//! Classifies every failed call into one of a small set of variants so callers
//! can decide between surfacing, form-level display, and fallback resolution.

use serde_json::Value;
use thiserror::Error;

/// Errors produced by the API gateway client
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401/403 response; always surfaced on auth-sensitive paths
    #[error("authentication failed ({status}): {detail}")]
    Auth {
        /// HTTP status code (401 or 403)
        status: u16,
        /// Short description extracted from the response body
        detail: String,
    },

    /// 404 response for a path with no fallback resolution
    #[error("resource not found: {path}")]
    NotFound {
        /// The requested path
        path: String,
    },

    /// Transport-level failure (timeout, DNS, connection refused)
    #[error("network error: {0}")]
    Network(String),

    /// 400 response on a submission endpoint, with field-level detail when present
    #[error("validation failed: {detail}")]
    Validation {
        /// Summarized validation message
        detail: String,
        /// Per-field messages extracted from the response body
        fields: Vec<(String, String)>,
    },

    /// Any other non-2xx response, with the body attached for display
    #[error("server error ({status})")]
    Server {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A 2xx response whose body was not valid JSON; never repaired, never cached
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Single summarized string for form errors and dashboard banners
    pub fn summary(&self) -> String {
        match self {
            ApiError::Auth { status, detail } => {
                if detail.is_empty() {
                    format!("Not authorized ({status})")
                } else {
                    format!("Not authorized: {detail}")
                }
            }
            ApiError::NotFound { path } => format!("Not found: {path}"),
            ApiError::Network(_) => "Cannot reach the server. Check the backend and try again.".to_string(),
            ApiError::Validation { detail, fields } => {
                if fields.is_empty() {
                    detail.clone()
                } else {
                    let joined: Vec<String> = fields
                        .iter()
                        .map(|(name, msg)| format!("{name}: {msg}"))
                        .collect();
                    joined.join("; ")
                }
            }
            ApiError::Server { status, .. } => format!("Server error ({status}). Try again."),
            ApiError::Decode(_) => "The server returned an unreadable response.".to_string(),
        }
    }

    /// Builds a `Validation` error from a 400 response body.
    ///
    /// Django REST framework returns `{"field": ["message", ...], ...}` for
    /// serializer failures; anything else collapses into the detail string.
    pub fn validation_from_body(body: &str) -> Self {
        let mut fields = Vec::new();
        let mut detail = String::from("invalid submission");

        if let Ok(value) = serde_json::from_str::<Value>(body) {
            match value {
                Value::Object(map) => {
                    for (name, messages) in map {
                        let msg = match &messages {
                            Value::Array(items) => items
                                .iter()
                                .filter_map(|m| m.as_str())
                                .collect::<Vec<_>>()
                                .join(", "),
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        if name == "detail" || name == "non_field_errors" {
                            detail = msg;
                        } else {
                            fields.push((name, msg));
                        }
                    }
                }
                Value::String(s) => detail = s,
                _ => {}
            }
        } else if !body.is_empty() {
            detail = body.to_string();
        }

        ApiError::Validation { detail, fields }
    }

    /// Extracts a short detail string from an auth failure body
    pub fn auth_detail_from_body(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_from_drf_field_errors() {
        let body = r#"{"email": ["Enter a valid email address."], "first_name": ["This field is required."]}"#;
        let err = ApiError::validation_from_body(body);

        match err {
            ApiError::Validation { fields, .. } => {
                assert_eq!(fields.len(), 2);
                assert!(fields
                    .iter()
                    .any(|(name, msg)| name == "email" && msg.contains("valid email")));
                assert!(fields
                    .iter()
                    .any(|(name, msg)| name == "first_name" && msg.contains("required")));
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_from_detail_only_body() {
        let body = r#"{"detail": "Appointment slot already taken"}"#;
        let err = ApiError::validation_from_body(body);

        match err {
            ApiError::Validation { detail, fields } => {
                assert_eq!(detail, "Appointment slot already taken");
                assert!(fields.is_empty());
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_from_non_json_body() {
        let err = ApiError::validation_from_body("Bad Request");
        match err {
            ApiError::Validation { detail, fields } => {
                assert_eq!(detail, "Bad Request");
                assert!(fields.is_empty());
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_summary_joins_fields() {
        let err = ApiError::Validation {
            detail: "invalid submission".to_string(),
            fields: vec![
                ("email".to_string(), "invalid".to_string()),
                ("gender".to_string(), "required".to_string()),
            ],
        };
        let summary = err.summary();
        assert!(summary.contains("email: invalid"));
        assert!(summary.contains("gender: required"));
    }

    #[test]
    fn test_network_summary_is_generic() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.summary().contains("Cannot reach the server"));
    }

    #[test]
    fn test_auth_detail_extraction() {
        assert_eq!(
            ApiError::auth_detail_from_body(r#"{"detail": "Invalid token."}"#),
            "Invalid token."
        );
        assert_eq!(ApiError::auth_detail_from_body("not json"), "");
    }
}
