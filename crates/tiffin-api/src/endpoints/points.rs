//! Loyalty tier endpoints: `{api_base}/points`.

use serde_json::Value;
use tiffin_core::{NewPointsRange, PointsRange};

use crate::client::{segment, ApiClient, Envelope};
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /points`, answered as `{ status, points: [...] }`.
    pub async fn list_points_ranges(&self) -> ApiResult<Vec<PointsRange>> {
        let env: Envelope<Vec<PointsRange>> = self.get(&self.api_url("/points")).await?;
        env.into_data()
    }

    /// `POST /points`
    pub async fn create_points_range(&self, range: &NewPointsRange) -> ApiResult<Option<String>> {
        let env: Envelope<Value> = self.post(&self.api_url("/points"), range).await?;
        env.into_ack()
    }

    /// `DELETE /points/{id}`
    pub async fn delete_points_range(&self, id: &str) -> ApiResult<Option<String>> {
        let url = self.api_url(&format!("/points/{}", segment(id)));
        let env: Envelope<Value> = self.delete(&url).await?;
        env.into_ack()
    }
}
