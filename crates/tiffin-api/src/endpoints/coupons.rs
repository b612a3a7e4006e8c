//! Coupon endpoints: `{api_base}/coupon`.

use serde::Serialize;
use serde_json::Value;
use tiffin_core::{Coupon, NewCoupon};
use tracing::info;

use crate::client::{segment, ApiClient, Envelope};
use crate::error::ApiResult;

#[derive(Serialize)]
struct StatusBody {
    enabled: bool,
}

impl ApiClient {
    /// `GET /coupon/`
    pub async fn list_coupons(&self) -> ApiResult<Vec<Coupon>> {
        let env: Envelope<Vec<Coupon>> = self.get(&self.api_url("/coupon/")).await?;
        env.into_data()
    }

    /// `POST /coupon/`
    pub async fn create_coupon(&self, coupon: &NewCoupon) -> ApiResult<Option<String>> {
        let env: Envelope<Value> = self.post(&self.api_url("/coupon/"), coupon).await?;
        let message = env.into_ack()?;
        info!(code = %coupon.code, "Coupon created");
        Ok(message)
    }

    /// `DELETE /coupon/{id}`
    pub async fn delete_coupon(&self, id: &str) -> ApiResult<Option<String>> {
        let url = self.api_url(&format!("/coupon/{}", segment(id)));
        let env: Envelope<Value> = self.delete(&url).await?;
        env.into_ack()
    }

    /// `PUT /coupon/{id}/status` with `{ enabled }`.
    pub async fn set_coupon_enabled(&self, id: &str, enabled: bool) -> ApiResult<Option<String>> {
        let url = self.api_url(&format!("/coupon/{}/status", segment(id)));
        let env: Envelope<Value> = self.put(&url, &StatusBody { enabled }).await?;
        env.into_ack()
    }
}
