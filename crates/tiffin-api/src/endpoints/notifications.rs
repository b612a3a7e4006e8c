//! Push notification endpoint: `{api_base}/notification`.

use serde_json::Value;
use tiffin_core::NotificationPayload;
use tracing::info;

use crate::client::{ApiClient, Envelope};
use crate::error::ApiResult;

impl ApiClient {
    /// `POST /notification/send` with `{ title, body }`.
    ///
    /// Delivery to devices happens server side; success here only means the
    /// server accepted the broadcast.
    pub async fn send_notification(&self, payload: &NotificationPayload) -> ApiResult<Option<String>> {
        let env: Envelope<Value> = self
            .post(&self.api_url("/notification/send"), payload)
            .await?;
        let message = env.into_ack()?;
        info!(title = %payload.title, "Notification accepted");
        Ok(message)
    }
}
