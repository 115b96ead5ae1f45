use axum::http::StatusCode;
use thiserror::Error;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Request validation errors ────────────────────────────────────────────
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Missing 'type' field in request")]
    MissingType,

    #[error("Invalid request type: {value}")]
    InvalidType { value: String },

    #[error("Missing 'data' field for case analysis")]
    MissingData,

    #[error("Invalid 'data' field for case analysis: expected an object")]
    InvalidData,

    #[error("Missing 'prompt' field for general query")]
    MissingPrompt,

    // ── Generation errors ────────────────────────────────────────────────────
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("Failed to build Gemini client: {message}")]
    ClientBuild { message: String },

    #[error("{message}")]
    InferenceError { message: String },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidJson(_)
                | AppError::MissingType
                | AppError::InvalidType { .. }
                | AppError::MissingData
                | AppError::InvalidData
                | AppError::MissingPrompt
        )
    }

    /// Failures the generation wrapper turns into fallback text instead of
    /// letting them reach the dispatcher.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::MissingApiKey | AppError::InferenceError { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        for e in [
            AppError::InvalidJson(err),
            AppError::MissingType,
            AppError::InvalidType { value: "x".into() },
            AppError::MissingData,
            AppError::InvalidData,
            AppError::MissingPrompt,
        ] {
            assert!(e.is_validation(), "{e}");
            assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn generation_errors_are_classified() {
        assert!(AppError::MissingApiKey.is_recoverable());
        assert!(AppError::InferenceError { message: "quota".into() }.is_recoverable());

        let fatal = AppError::ClientBuild { message: "bad key format".into() };
        assert!(!fatal.is_recoverable());
        assert_eq!(fatal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_type_message_carries_the_value() {
        let e = AppError::InvalidType { value: "unknown-value".into() };
        assert_eq!(e.to_string(), "Invalid request type: unknown-value");
    }
}
