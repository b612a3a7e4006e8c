//! Store status and analytics endpoints: `{api_base}/store`, `{api_base}/analytics`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tiffin_core::{AnalyticsOverview, DailyOrders, TopItem};
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Deserialize)]
struct StoreStatus {
    store: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreStatusBody<'a> {
    store: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    closure_reason: Option<&'a str>,
}

#[derive(Deserialize)]
struct OrdersPerDay {
    #[serde(default)]
    data: Vec<DailyOrders>,
}

#[derive(Deserialize)]
struct TopItems {
    #[serde(default)]
    items: Vec<TopItem>,
}

impl ApiClient {
    /// `GET /store/status`: whether the store is taking orders.
    pub async fn store_status(&self) -> ApiResult<bool> {
        let status: StoreStatus = self.get(&self.api_url("/store/status")).await?;
        Ok(status.store)
    }

    /// `PUT /store/status`
    pub async fn set_store_status(&self, open: bool, closure_reason: Option<&str>) -> ApiResult<Value> {
        let body = StoreStatusBody {
            store: open,
            closure_reason: closure_reason.filter(|r| !open && !r.trim().is_empty()),
        };
        let result = self.put(&self.api_url("/store/status"), &body).await?;
        info!(open, "Store status changed");
        Ok(result)
    }

    /// `GET /analytics/overview`
    pub async fn analytics_overview(&self) -> ApiResult<AnalyticsOverview> {
        self.get(&self.api_url("/analytics/overview")).await
    }

    /// `GET /analytics/orders-per-day`, answered as `{ data: [...] }`.
    pub async fn orders_per_day(&self) -> ApiResult<Vec<DailyOrders>> {
        let body: OrdersPerDay = self.get(&self.api_url("/analytics/orders-per-day")).await?;
        Ok(body.data)
    }

    /// `GET /analytics/top-items`, answered as `{ items: [...] }`.
    pub async fn top_items(&self) -> ApiResult<Vec<TopItem>> {
        let body: TopItems = self.get(&self.api_url("/analytics/top-items")).await?;
        Ok(body.items)
    }
}
