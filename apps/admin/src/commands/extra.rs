//! # Extra Cash Settlement Screen
//!
//! ```text
//! GET merchants-unsettled-balances
//!        │
//!        ▼
//! join_all( GET extra-cash/{merchantId} for each merchant )
//!        │
//!        ├── ok    ──► sum of entries with isSettled = false
//!        └── error ──► 0 (logged, the list still renders)
//! ```

use std::future::Future;

use futures_util::future::join_all;
use serde::Serialize;
use tiffin_api::ApiResult;
use tiffin_core::validation::parse_extra_percentage;
use tiffin_core::{unsettled_total, ExtraCash, Merchant, Money};
use tracing::warn;

use super::Ctx;
use crate::cli::ExtraSettlementsCommand;
use crate::error::AppResult;
use crate::output::Table;

/// One merchant row of the screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraRow {
    pub merchant_id: String,
    pub name: String,
    pub extra_percentage: Option<f64>,
    pub unsettled_extra: Money,
}

pub async fn run(ctx: &Ctx, cmd: ExtraSettlementsCommand) -> AppResult<()> {
    match cmd {
        ExtraSettlementsCommand::List => {
            let merchants = ctx.client.merchants_unsettled_balances().await?;
            let rows = extra_rows(&merchants, move |id| async move {
                ctx.client.merchant_extra_cash(&id).await
            })
            .await;
            ctx.out.emit(&rows, || extra_table(&rows).print_or("No merchants."))
        }
        ExtraSettlementsCommand::Settle {
            merchant_id,
            settlement_id,
        } => {
            let result = ctx
                .client
                .settle_merchant_extra_cash(&merchant_id, &settlement_id)
                .await?;
            ctx.out
                .emit(&result, || println!("Extra cash settled successfully!"))
        }
        ExtraSettlementsCommand::SetPercentage {
            merchant_id,
            percentage,
        } => {
            let pct = parse_extra_percentage(&percentage)?;
            let result = ctx
                .client
                .update_merchant_extra_percentage(&merchant_id, pct)
                .await?;
            ctx.out.emit(&result, || println!("Extra percentage updated."))
        }
    }
}

/// Fetches every merchant's extra-cash ledger concurrently and sums the
/// unsettled part. A failed fetch counts as zero.
pub async fn extra_rows<F, Fut>(merchants: &[Merchant], fetch: F) -> Vec<ExtraRow>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = ApiResult<Vec<ExtraCash>>>,
{
    let ledgers = join_all(merchants.iter().map(|m| fetch(m.merchant_id.clone()))).await;

    merchants
        .iter()
        .zip(ledgers)
        .map(|(m, ledger)| {
            let unsettled_extra = match ledger {
                Ok(records) => unsettled_total(&records),
                Err(e) => {
                    warn!(merchant = %m.merchant_id, error = %e, "Failed to load extra cash");
                    Money::zero()
                }
            };
            ExtraRow {
                merchant_id: m.merchant_id.clone(),
                name: m.full_name(),
                extra_percentage: m.extra_percentage,
                unsettled_extra,
            }
        })
        .collect()
}

fn extra_table(rows: &[ExtraRow]) -> Table {
    let mut table = Table::new(["Merchant", "Name", "Extra %", "Unsettled extra"]);
    for r in rows {
        table.row([
            r.merchant_id.clone(),
            r.name.clone(),
            r.extra_percentage
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "—".into()),
            r.unsettled_extra.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tiffin_api::ApiError;

    #[tokio::test]
    async fn test_failed_fetch_counts_as_zero() {
        let merchants: Vec<Merchant> = serde_json::from_value(json!([
            { "_id": "a", "merchantId": "TW-1", "firstName": "Asha", "extraPercentage": 2.5 },
            { "_id": "b", "merchantId": "TW-2", "firstName": "Ravi" }
        ]))
        .unwrap();

        let rows = extra_rows(&merchants, |id| async move {
            if id == "TW-1" {
                let ledger: Vec<ExtraCash> = serde_json::from_value(json!([
                    { "_id": "e1", "merchantId": "TW-1", "amount": 12.5, "isSettled": false },
                    { "_id": "e2", "merchantId": "TW-1", "amount": 40, "isSettled": true }
                ]))
                .unwrap();
                Ok(ledger)
            } else {
                Err(ApiError::Status {
                    status: 502,
                    body: String::new(),
                })
            }
        })
        .await;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unsettled_extra, Money::from_paise(1250));
        assert_eq!(rows[1].unsettled_extra, Money::zero());

        let text = extra_table(&rows).render();
        assert!(text.contains("2.50"));
        assert!(text.lines().nth(3).unwrap().ends_with("₹ 0"));
    }
}
