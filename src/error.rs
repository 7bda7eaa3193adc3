//! Error types for the catalog engine.

use serde::Serialize;
use thiserror::Error;

/// Stable numeric error codes exposed at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    NotFound = 1,
    Conflict = 2,
    Unavailable = 3,
    InvalidState = 4,
    BadValue = 5,
}

/// Main engine error type. Every operation is total at the boundary:
/// absence, duplication, exhaustion and lifecycle violations are reported
/// here, never as panics.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::NotFound(_) => ErrorCode::NotFound,
            EngineError::Conflict(_) => ErrorCode::Conflict,
            EngineError::Unavailable(_) => ErrorCode::Unavailable,
            EngineError::InvalidState(_) => ErrorCode::InvalidState,
            EngineError::Validation(_) => ErrorCode::BadValue,
        }
    }
}

impl From<validator::ValidationErrors> for EngineError {
    fn from(errors: validator::ValidationErrors) -> Self {
        EngineError::Validation(errors.to_string())
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Plain result envelope handed to the presentation collaborator:
/// success flag, human-readable message, optional payload.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    pub code: u32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl<T> Outcome<T> {
    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as u32,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn from_result(result: EngineResult<T>, message: impl Into<String>) -> Self {
        match result {
            Ok(payload) => Self::ok(message, payload),
            Err(e) => Self {
                success: false,
                code: e.code() as u32,
                message: e.to_string(),
                payload: None,
            },
        }
    }
}

impl<T> From<EngineResult<T>> for Outcome<T> {
    fn from(result: EngineResult<T>) -> Self {
        Self::from_result(result, "OK")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_carries_error_code_and_message() {
        let result: EngineResult<u32> = Err(EngineError::NotFound("book B9".into()));
        let outcome = Outcome::from(result);
        assert!(!outcome.success);
        assert_eq!(outcome.code, ErrorCode::NotFound as u32);
        assert_eq!(outcome.message, "Not found: book B9");
        assert!(outcome.payload.is_none());
    }

    #[test]
    fn outcome_carries_payload_on_success() {
        let outcome = Outcome::from_result(Ok(42), "borrowed");
        assert!(outcome.success);
        assert_eq!(outcome.payload, Some(42));
        assert_eq!(outcome.message, "borrowed");
    }
}
