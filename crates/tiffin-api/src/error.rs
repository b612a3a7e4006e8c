//! # API Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Transport      │  │   Server        │  │     Client side         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Http (reqwest) │  │  Status 4xx/5xx │  │  InvalidConfig          │ │
//! │  │  timeouts, DNS  │  │  Rejected       │  │  InvalidInput           │ │
//! │  │                 │  │  (status:false) │  │  Decode / Io            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (connect, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // =========================================================================
    // Server Errors
    // =========================================================================
    /// Non-2xx response.
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx response whose envelope says `status: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    // =========================================================================
    // Client-side Errors
    // =========================================================================
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status code when the server answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request gave up after `timeout_secs`.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Http(e) if e.is_timeout())
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidConfig(err.to_string())
    }
}

impl From<tiffin_core::ValidationError> for ApiError {
    fn from(err: tiffin_core::ValidationError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        let err = ApiError::Status {
            status: 404,
            body: "not found".into(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "Server returned 404: not found");
        assert_eq!(ApiError::Rejected("no".into()).status_code(), None);
    }

    #[test]
    fn test_validation_conversion() {
        let err: ApiError = tiffin_core::ValidationError::Required {
            field: "upi".into(),
        }
        .into();
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m == "upi is required"));
    }
}
