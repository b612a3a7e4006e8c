//! # HTTP Client
//!
//! A thin wrapper over one shared `reqwest::Client`.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  endpoint fn (e.g. list_coupons)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get/post/put/patch/delete ──► send() ──► one HTTP request              │
//! │                                  │                                      │
//! │                  ┌───────────────┼────────────────┐                     │
//! │                  ▼               ▼                ▼                     │
//! │           transport error    non-2xx          2xx body                  │
//! │           ApiError::Http     ApiError::Status  JSON → T                 │
//! │                                               (empty body → null)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Envelope-style responses (`{ status, data, message }`) are unwrapped by the
//! endpoint functions via [`Envelope::into_data`] / [`Envelope::into_ack`].

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// Envelope
// =============================================================================

/// The storefront's `{ status, data, message }` wrapper.
///
/// The points endpoint names its payload `points` instead of `data`. When a
/// body carries both, a non-null `data` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEnvelope<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    #[serde(default)]
    status: bool,
    data: Option<T>,
    points: Option<T>,
    message: Option<String>,
}

impl<T> From<RawEnvelope<T>> for Envelope<T> {
    fn from(raw: RawEnvelope<T>) -> Self {
        Envelope {
            status: raw.status,
            data: raw.data.or(raw.points),
            message: raw.message,
        }
    }
}

impl<T> Envelope<T> {
    /// The payload of a successful response.
    pub fn into_data(self) -> ApiResult<T> {
        if !self.status {
            return Err(ApiError::Rejected(rejection_message(self.message)));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }

    /// Checks `status` and returns the server's message, if any.
    pub fn into_ack(self) -> ApiResult<Option<String>> {
        if !self.status {
            return Err(ApiError::Rejected(rejection_message(self.message)));
        }
        Ok(self.message)
    }
}

fn rejection_message(message: Option<String>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "request was not accepted".to_string())
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the storefront and merchant REST APIs.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Builds a client after validating `config`.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(ApiClient { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        self.config.api_url(path)
    }

    pub(crate) fn merchant_url(&self, path: &str) -> String {
        self.config.merchant_url(path)
    }

    // =========================================================================
    // Verb Helpers
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.send(Method::GET, url, self.http.get(url)).await
    }

    pub(crate) async fn post<B, T>(&self, url: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, url, self.http.post(url).json(body)).await
    }

    /// POST without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.send(Method::POST, url, self.http.post(url)).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<T> {
        self.send(Method::POST, url, self.http.post(url).multipart(form))
            .await
    }

    pub(crate) async fn put<B, T>(&self, url: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, url, self.http.put(url).json(body)).await
    }

    pub(crate) async fn patch<B, T>(&self, url: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, url, self.http.patch(url).json(body))
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.send(Method::DELETE, url, self.http.delete(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        debug!(%method, url, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(%method, url, error = %e, "Request failed");
            ApiError::Http(e)
        })?;

        let status = response.status();
        debug!(%method, url, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%method, url, status = status.as_u16(), "Non-success response");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };

        serde_json::from_slice(body).map_err(|e| {
            warn!(%method, url, error = %e, "Response body did not decode");
            ApiError::Decode(e.to_string())
        })
    }
}

/// Percent-encodes one path segment (ids typed by the operator).
pub(crate) fn segment(raw: &str) -> String {
    tiffin_core::deeplink::encode_component(raw)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_data() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_value(json!({ "status": true, "data": [1, 2] })).unwrap();
        assert_eq!(env.into_data().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_envelope_points_alias() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_value(json!({ "status": true, "points": [7] })).unwrap();
        assert_eq!(env.into_data().unwrap(), vec![7]);
    }

    #[test]
    fn test_envelope_with_data_and_points() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_value(json!({ "status": true, "data": [1], "points": [7] })).unwrap();
        assert_eq!(env.data, Some(vec![1]));

        let env: Envelope<Vec<u32>> =
            serde_json::from_value(json!({ "status": true, "data": null, "points": [7] })).unwrap();
        assert_eq!(env.into_data().unwrap(), vec![7]);
    }

    #[test]
    fn test_envelope_rejection() {
        let env: Envelope<serde_json::Value> =
            serde_json::from_value(json!({ "status": false, "message": "User not found" })).unwrap();
        assert!(matches!(env.into_ack(), Err(ApiError::Rejected(m)) if m == "User not found"));

        let env: Envelope<serde_json::Value> = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::Rejected(_))));
    }

    #[test]
    fn test_envelope_missing_data() {
        let env: Envelope<Vec<u32>> = serde_json::from_value(json!({ "status": true })).unwrap();
        assert!(matches!(env.into_data(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(ApiClient::new(ApiConfig::with_base("nope")).is_err());
        assert!(ApiClient::new(ApiConfig::default()).is_ok());
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("M/1 x"), "M%2F1%20x");
    }
}
