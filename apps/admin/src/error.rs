//! # Console Error Type
//!
//! What the operator sees when a command fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ─┐                                                     │
//! │  CoreError ───────┤                                                     │
//! │  ApiError ────────┼──► AppError ──► code() ──► stderr + exit status     │
//! │  io / toml / img ─┘                                                     │
//! │                                                                         │
//! │  $ tiffin-admin coupons delete c1                                       │
//! │  error[NOT_AUTHENTICATED]: Not signed in. Run `tiffin-admin auth login` │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use tiffin_api::ApiError;
use tiffin_core::{CoreError, ValidationError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not signed in. Run `tiffin-admin auth login` first.")]
    NotAuthenticated,

    /// OTP login refused ("Invalid phone number.", "Invalid OTP.", ...).
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session file error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("Cancelled")]
    Cancelled,
}

/// Machine-readable classification, printed with `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotAuthenticated,
    AuthFailed,
    ValidationError,
    NotFound,
    Rejected,
    ServerError,
    NetworkError,
    Timeout,
    ConfigError,
    Internal,
    Cancelled,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::AuthFailed => "AUTH_FAILED",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Rejected => "REJECTED",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::Cancelled => "CANCELLED",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotAuthenticated => ErrorCode::NotAuthenticated,
            AppError::Auth(_) => ErrorCode::AuthFailed,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            AppError::Core(CoreError::OverlappingRange { .. }) => ErrorCode::ValidationError,
            AppError::Core(_) => ErrorCode::NotFound,
            AppError::Api(api) => match api {
                ApiError::Status { status: 404, .. } => ErrorCode::NotFound,
                ApiError::Status { .. } | ApiError::Decode(_) => ErrorCode::ServerError,
                ApiError::Rejected(_) => ErrorCode::Rejected,
                _ if api.is_timeout() => ErrorCode::Timeout,
                ApiError::Http(_) => ErrorCode::NetworkError,
                ApiError::InvalidInput(_) => ErrorCode::ValidationError,
                ApiError::InvalidConfig(_) => ErrorCode::ConfigError,
                ApiError::Io(_) => ErrorCode::Internal,
            },
            AppError::Config(_) => ErrorCode::ConfigError,
            AppError::Session(_) | AppError::Io(_) | AppError::Image(_) | AppError::Qr(_) => {
                ErrorCode::Internal
            }
            AppError::Cancelled => ErrorCode::Cancelled,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self.code() {
            ErrorCode::Cancelled => 130,
            ErrorCode::NotAuthenticated | ErrorCode::AuthFailed => 3,
            ErrorCode::ValidationError => 2,
            _ => 1,
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Session(err.to_string())
    }
}

impl From<qrcode::types::QrError> for AppError {
    fn from(err: qrcode::types::QrError) -> Self {
        AppError::Qr(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(AppError::NotAuthenticated.code(), ErrorCode::NotAuthenticated);
        assert_eq!(AppError::NotAuthenticated.exit_code(), 3);

        let err: AppError = ApiError::Status {
            status: 404,
            body: String::new(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err: AppError = ApiError::Rejected("no".into()).into();
        assert_eq!(err.code().as_str(), "REJECTED");
        assert_eq!(err.to_string(), "Request rejected: no");
    }

    #[tokio::test]
    async fn test_slow_server_maps_to_timeout() {
        use tiffin_api::{ApiClient, ApiConfig};
        use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut cfg = ApiConfig::with_base(&server.uri());
        cfg.timeout_secs = 1;
        let client = ApiClient::new(cfg).unwrap();

        let err: AppError = client.list_banners().await.unwrap_err().into();
        assert_eq!(err.code(), ErrorCode::Timeout);
        assert_eq!(err.code().as_str(), "TIMEOUT");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err: AppError = ValidationError::Required {
            field: "settlementId".into(),
        }
        .into();
        assert_eq!(err.to_string(), "settlementId is required");
        assert_eq!(err.exit_code(), 2);

        // Checks done inside the API client surface the same way.
        let err: AppError = ApiError::from(ValidationError::Required {
            field: "settlementId".into(),
        })
        .into();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.exit_code(), 2);
    }
}
