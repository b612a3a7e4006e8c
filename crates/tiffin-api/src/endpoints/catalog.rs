//! Menu endpoints: `{api_base}/menu`.

use serde_json::Value;
use tiffin_core::{CatalogPayload, ItemEdit};
use tracing::info;

use crate::client::{segment, ApiClient};
use crate::error::{ApiError, ApiResult};

impl ApiClient {
    /// `GET /menu/latest`: the most recent catalog snapshot.
    pub async fn latest_menu(&self) -> ApiResult<CatalogPayload> {
        self.get(&self.api_url("/menu/latest")).await
    }

    /// `POST /menu/sync`: asks the server to pull the catalog from the
    /// upstream menu provider.
    pub async fn sync_menu(&self) -> ApiResult<Value> {
        let result = self.post_empty(&self.api_url("/menu/sync")).await?;
        info!("Menu sync requested");
        Ok(result)
    }

    /// `PATCH /menu/item/{itemId}` with `inStock` and/or `image`.
    pub async fn edit_menu_item(&self, item_id: &str, edit: &ItemEdit) -> ApiResult<Value> {
        if edit.in_stock.is_none() && edit.image.is_none() {
            return Err(ApiError::InvalidInput("nothing to update".to_string()));
        }
        let url = self.api_url(&format!("/menu/item/{}", segment(item_id)));
        self.patch(&url, edit).await
    }
}
