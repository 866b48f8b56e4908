use serde_json::Value;
use thiserror::Error;

use crate::auth::CredentialError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("Session ended - please log in again (status {status})")]
    SessionTerminated { status: u16, body: String },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Credential store error: {0}")]
    Credentials(#[from] CredentialError),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: u16, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status {
            400 => ApiError::Validation(Self::flatten_errors(body).unwrap_or(truncated)),
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Flatten a REST framework style error body into one line:
    /// `{"amount": ["Must be positive."], "detail": "x"}` becomes
    /// `amount: Must be positive.; x`
    fn flatten_errors(body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        let obj = value.as_object()?;

        let mut parts = Vec::new();
        for (field, messages) in obj {
            let text = match messages {
                Value::String(s) => s.clone(),
                Value::Array(items) => items
                    .iter()
                    .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
                    .collect::<Vec<_>>()
                    .join(" "),
                other => other.to_string(),
            };
            match field.as_str() {
                "detail" | "error" | "non_field_errors" => parts.push(text),
                _ => parts.push(format!("{}: {}", field, text)),
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }

    /// Whether this error ended the session (the caller has been sent to login)
    pub fn is_session_terminated(&self) -> bool {
        matches!(self, ApiError::SessionTerminated { .. })
    }
}
