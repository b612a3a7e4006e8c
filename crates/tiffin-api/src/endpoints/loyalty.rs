//! Loyalty refund endpoint: `{api_base}/user/loyalty`.

use tiffin_core::validation::validate_refund;
use tiffin_core::{LoyaltyBalance, LoyaltyCredit};
use tracing::info;

use crate::client::{ApiClient, Envelope};
use crate::error::ApiResult;

impl ApiClient {
    /// `POST /user/loyalty/add` with `{ phone, points }`.
    ///
    /// Returns the raw envelope: `status: false` is an expected answer here
    /// (unknown customer, for instance) and its `message` is shown to the
    /// operator as is.
    pub async fn add_loyalty_points(&self, credit: &LoyaltyCredit) -> ApiResult<Envelope<LoyaltyBalance>> {
        validate_refund(&credit.phone, credit.points)?;
        let env: Envelope<LoyaltyBalance> = self
            .post(&self.api_url("/user/loyalty/add"), credit)
            .await?;
        info!(phone = %credit.phone, points = credit.points, accepted = env.status, "Loyalty refund sent");
        Ok(env)
    }
}
