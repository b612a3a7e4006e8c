//! # API Configuration
//!
//! Where the two backends live and how long to wait for them.
//!
//! ## Endpoint Roots
//! ```text
//! api_base      = https://api.sixty6foods.in
//!   ├── /banner   /coupon   /points   /notification
//!   ├── /menu     /store    /analytics
//!   └── /user     /auth
//!
//! merchant_base = https://merchant.tiffinwala.services
//!   └── /merchants-balances, /settle-all/{id}, /extra-cash/{id}, ...
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, ApiResult};

/// Connection settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Storefront API base URL, without trailing slash.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Merchant service base URL.
    #[serde(default = "default_merchant_base")]
    pub merchant_base: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String {
    "https://api.sixty6foods.in".to_string()
}

fn default_merchant_base() -> String {
    "https://merchant.tiffinwala.services".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("tiffin-admin/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            api_base: default_api_base(),
            merchant_base: default_merchant_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Config pointing both services at one base URL (mock servers, staging).
    pub fn with_base(base: &str) -> Self {
        ApiConfig {
            api_base: base.to_string(),
            merchant_base: base.to_string(),
            ..Default::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        for (name, value) in [("api_base", &self.api_base), ("merchant_base", &self.merchant_base)] {
            let url = Url::parse(value)
                .map_err(|e| ApiError::InvalidConfig(format!("{} '{}': {}", name, value, e)))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ApiError::InvalidConfig(format!(
                    "{} must start with http:// or https://, got: {}",
                    name, value
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(ApiError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// `{api_base}{path}`; `path` starts with `/`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    /// `{merchant_base}{path}`; `path` starts with `/`.
    pub fn merchant_url(&self, path: &str) -> String {
        format!("{}{}", self.merchant_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ApiConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.api_url("/banner/"), "https://api.sixty6foods.in/banner/");
        assert_eq!(
            cfg.merchant_url("/merchants-balances"),
            "https://merchant.tiffinwala.services/merchants-balances"
        );
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let cfg = ApiConfig::with_base("http://127.0.0.1:9000/");
        assert_eq!(cfg.api_url("/points"), "http://127.0.0.1:9000/points");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cfg = ApiConfig::with_base("ftp://example.com");
        assert!(matches!(cfg.validate(), Err(ApiError::InvalidConfig(_))));

        let cfg = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        assert!(ApiConfig::with_base("not a url").validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: ApiConfig = serde_json::from_str(r#"{ "timeout_secs": 5 }"#).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.api_base, "https://api.sixty6foods.in");
    }
}
