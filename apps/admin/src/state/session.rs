//! # Session State
//!
//! The console's login: an OTP exchange against the storefront auth API and
//! a small TOML file recording that it happened.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  auth send-otp --phone P                                               │
//! │     │                                                                   │
//! │     ├── P not in allowlist ──► "Invalid phone number." (no request)    │
//! │     └── POST /auth/send-otp ──► true / false                           │
//! │                                                                         │
//! │  auth verify --phone P --otp 123456                                    │
//! │     │                                                                   │
//! │     └── POST /auth/verify-otp                                          │
//! │            ├── false ──► "Invalid OTP."                                │
//! │            └── true  ──► session.toml { authenticated = true,          │
//! │                                         token = "dummy", ... }         │
//! │                                                                         │
//! │  any other screen ──► session.toml authenticated? else refuse          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tiffin_api::ApiClient;
use tiffin_core::validation::{validate_otp, validate_phone_allowed};
use tiffin_core::TOKEN_MARKER;
use tracing::{debug, info, warn};

use crate::config::project_dirs;
use crate::error::{AppError, AppResult};

pub const SESSION_FILE_NAME: &str = "session.toml";

// =============================================================================
// Session File
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Reads the session file; a missing file is a signed-out session.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(?path, "No session file");
            return Ok(Session::default());
        }
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| AppError::Session(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::Session(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Session file location: `TIFFIN_SESSION_PATH`, else the platform data dir.
    pub fn default_path() -> AppResult<PathBuf> {
        if let Ok(path) = std::env::var("TIFFIN_SESSION_PATH") {
            return Ok(PathBuf::from(path));
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
            .ok_or_else(|| AppError::Session("Could not determine app data directory".into()))
    }
}

// =============================================================================
// OTP Backend
// =============================================================================

/// The two auth calls the login flow needs.
#[allow(async_fn_in_trait)]
pub trait OtpService {
    async fn send_otp(&self, phone: &str) -> tiffin_api::ApiResult<bool>;
    async fn verify_otp(&self, phone: &str, otp: &str) -> tiffin_api::ApiResult<bool>;
}

impl OtpService for ApiClient {
    async fn send_otp(&self, phone: &str) -> tiffin_api::ApiResult<bool> {
        ApiClient::send_otp(self, phone).await
    }

    async fn verify_otp(&self, phone: &str, otp: &str) -> tiffin_api::ApiResult<bool> {
        ApiClient::verify_otp(self, phone, otp).await
    }
}

// =============================================================================
// Auth Context
// =============================================================================

/// Login state plus the OTP operations that change it.
pub struct AuthContext<'a, S: OtpService> {
    service: &'a S,
    allowed_phones: &'a [String],
    path: PathBuf,
    session: Session,
}

impl<'a, S: OtpService> AuthContext<'a, S> {
    pub fn load(service: &'a S, allowed_phones: &'a [String], path: PathBuf) -> AppResult<Self> {
        let session = Session::load(&path)?;
        Ok(AuthContext {
            service,
            allowed_phones,
            path,
            session,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.authenticated
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Asks the server to text an OTP to `phone`.
    ///
    /// Phones outside the allowlist are refused before any request. Network
    /// and server failures are logged and reported as `false`.
    pub async fn send_otp_code(&self, phone: &str) -> AppResult<bool> {
        let phone = validate_phone_allowed(phone, self.allowed_phones)?;
        match self.service.send_otp(&phone).await {
            Ok(sent) => {
                info!(phone = %phone, sent, "OTP requested");
                Ok(sent)
            }
            Err(e) => {
                warn!(phone = %phone, error = %e, "OTP request failed");
                Ok(false)
            }
        }
    }

    /// Verifies the code; on success the session is marked authenticated and
    /// written to disk.
    pub async fn verify_otp_code(&mut self, phone: &str, otp: &str) -> AppResult<bool> {
        let otp = validate_otp(otp)?;
        let phone = phone.trim();

        let verified = match self.service.verify_otp(phone, &otp).await {
            Ok(v) => v,
            Err(e) => {
                warn!(phone = %phone, error = %e, "OTP verification failed");
                false
            }
        };
        if !verified {
            return Ok(false);
        }

        self.session = Session {
            authenticated: true,
            phone: Some(phone.to_string()),
            token: Some(TOKEN_MARKER.to_string()),
            signed_in_at: Some(Utc::now()),
        };
        self.session.save(&self.path)?;
        info!(phone = %phone, "Signed in");
        Ok(true)
    }

    /// Clears the session and removes the file.
    pub fn logout(&mut self) -> AppResult<()> {
        self.session = Session::default();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        info!("Signed out");
        Ok(())
    }

    /// Fails with [`AppError::NotAuthenticated`] unless signed in.
    pub fn require(&self) -> AppResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::NotAuthenticated)
        }
    }
}
