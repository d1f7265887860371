//! Handler error model.
//!
//! Every error that reaches an API client carries a numeric code next to its
//! message so callers can branch without parsing text.

use serde::Serialize;
use thiserror::Error;

/// Numeric error codes reported in error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u16)]
pub enum ErrorCode {
    InvalidRequestData = 1,
    InvalidEntity = 2,
    InternalError = 99,
}

impl ErrorCode {
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Errors raised while serving a get-by-id request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiGetError {
    /// Missing or malformed identifier in the request path.
    #[error("{0}")]
    InvalidRequestData(String),

    /// The entity name could not be resolved to a model.
    #[error("{0}")]
    InvalidEntity(String),

    /// Anything unexpected, including lookup failures surfaced by the HTTP layer.
    #[error("{0}")]
    Internal(String),
}

impl ApiGetError {
    pub fn invalid_request_data(msg: impl Into<String>) -> Self {
        Self::InvalidRequestData(msg.into())
    }

    pub fn invalid_entity(msg: impl Into<String>) -> Self {
        Self::InvalidEntity(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidRequestData(_) => ErrorCode::InvalidRequestData,
            Self::InvalidEntity(_) => ErrorCode::InvalidEntity,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Error name carried in response bodies, shared by every record API handler
    #[allow(clippy::unused_self)]
    pub const fn name(&self) -> &'static str {
        "ApiEditError"
    }
}

/// Serializable error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
    pub name: &'static str,
}

impl From<&ApiGetError> for ErrorBody {
    fn from(err: &ApiGetError) -> Self {
        Self {
            message: err.to_string(),
            code: err.code().as_u16(),
            name: err.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiGetError::invalid_request_data("x").code().as_u16(), 1);
        assert_eq!(ApiGetError::invalid_entity("x").code().as_u16(), 2);
        assert_eq!(ApiGetError::internal("x").code().as_u16(), 99);
    }

    #[test]
    fn test_error_body_carries_message_and_code() {
        let err = ApiGetError::invalid_entity("Model does not exist");
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "message": "Model does not exist",
                "code": 2,
                "name": "ApiEditError"
            })
        );
    }
}
