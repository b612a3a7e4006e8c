//! # Merchant Service Endpoints
//!
//! Everything under `merchant_base`. Unlike the storefront API these answer
//! with bare JSON (arrays or objects), not the `{ status, data }` envelope.
//!
//! ```text
//! GET  /merchants-balances                    → [Merchant]
//! GET  /merchants-unsettled-balances          → [Merchant]
//! PUT  /settle-all/{merchantId}               { settlementId }
//! PUT  /merchant/{merchantId}/upi             { upi }
//! GET  /extra-cash/{merchantId}               → [ExtraCash]
//! PUT  /extra-cash/settle/{merchantId}        { settlementId }
//! PUT  /merchant/{merchantId}/extra-percentage { extraPercentage }
//! ```

use serde::Serialize;
use serde_json::Value;
use tiffin_core::validation::{validate_settlement_id, validate_upi};
use tiffin_core::{ExtraCash, Merchant};
use tracing::info;

use crate::client::{segment, ApiClient};
use crate::error::{ApiError, ApiResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettlementBody<'a> {
    settlement_id: &'a str,
}

#[derive(Serialize)]
struct UpiBody<'a> {
    upi: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtraPercentageBody {
    extra_percentage: f64,
}

impl ApiClient {
    /// All merchants with their balances and UPI ids.
    pub async fn merchants_balances(&self) -> ApiResult<Vec<Merchant>> {
        self.get(&self.merchant_url("/merchants-balances")).await
    }

    /// Merchants with their unsettled balances.
    pub async fn merchants_unsettled_balances(&self) -> ApiResult<Vec<Merchant>> {
        self.get(&self.merchant_url("/merchants-unsettled-balances"))
            .await
    }

    /// Marks every unsettled transaction of a merchant as settled under the
    /// given external settlement reference.
    pub async fn settle_all_transactions(&self, merchant_id: &str, settlement_id: &str) -> ApiResult<Value> {
        let settlement_id = validate_settlement_id(settlement_id)?;
        let url = self.merchant_url(&format!("/settle-all/{}", segment(merchant_id)));
        let result = self
            .put(&url, &SettlementBody {
                settlement_id: &settlement_id,
            })
            .await?;
        info!(merchant_id, settlement_id = %settlement_id, "Transactions settled");
        Ok(result)
    }

    pub async fn update_merchant_upi(&self, merchant_id: &str, upi: &str) -> ApiResult<Value> {
        let upi = validate_upi(upi)?;
        let url = self.merchant_url(&format!("/merchant/{}/upi", segment(merchant_id)));
        let result = self.put(&url, &UpiBody { upi: &upi }).await?;
        info!(merchant_id, "Merchant UPI updated");
        Ok(result)
    }

    /// The merchant's extra-cash ledger, settled entries included.
    pub async fn merchant_extra_cash(&self, merchant_id: &str) -> ApiResult<Vec<ExtraCash>> {
        let url = self.merchant_url(&format!("/extra-cash/{}", segment(merchant_id)));
        self.get(&url).await
    }

    pub async fn settle_merchant_extra_cash(&self, merchant_id: &str, settlement_id: &str) -> ApiResult<Value> {
        let settlement_id = validate_settlement_id(settlement_id)?;
        let url = self.merchant_url(&format!("/extra-cash/settle/{}", segment(merchant_id)));
        let result = self
            .put(&url, &SettlementBody {
                settlement_id: &settlement_id,
            })
            .await?;
        info!(merchant_id, settlement_id = %settlement_id, "Extra cash settled");
        Ok(result)
    }

    /// Sets the extra-cash percentage (0-100, up to two decimals).
    pub async fn update_merchant_extra_percentage(&self, merchant_id: &str, extra_percentage: f64) -> ApiResult<Value> {
        if !extra_percentage.is_finite() || !(0.0..=100.0).contains(&extra_percentage) {
            return Err(ApiError::InvalidInput(format!(
                "extraPercentage must be between 0 and 100, got {}",
                extra_percentage
            )));
        }
        let url = self.merchant_url(&format!("/merchant/{}/extra-percentage", segment(merchant_id)));
        let result = self.put(&url, &ExtraPercentageBody { extra_percentage }).await?;
        info!(merchant_id, extra_percentage, "Extra percentage updated");
        Ok(result)
    }
}
