//! Merchant settlement screen: outstanding balances, settle-all, UPI ids.

use tiffin_core::Merchant;

use super::Ctx;
use crate::cli::SettlementsCommand;
use crate::error::AppResult;
use crate::output::Table;

pub async fn run(ctx: &Ctx, cmd: SettlementsCommand) -> AppResult<()> {
    match cmd {
        SettlementsCommand::List => {
            let merchants = ctx.client.merchants_balances().await?;
            ctx.out
                .emit(&merchants, || balance_table(&merchants).print_or("No merchants."))
        }
        SettlementsCommand::Settle {
            merchant_id,
            settlement_id,
        } => {
            ctx.out.confirm(&format!(
                "Settle all transactions of {} against {}?",
                merchant_id,
                settlement_id.trim()
            ))?;
            let result = ctx
                .client
                .settle_all_transactions(&merchant_id, &settlement_id)
                .await?;
            ctx.out.emit(&result, || println!("Settled successfully!"))
        }
        SettlementsCommand::SetUpi { merchant_id, upi } => {
            let result = ctx.client.update_merchant_upi(&merchant_id, &upi).await?;
            ctx.out.emit(&result, || println!("UPI updated successfully!"))
        }
    }
}

fn balance_table(merchants: &[Merchant]) -> Table {
    let mut table = Table::new(["Merchant", "Name", "Phone", "UPI", "Outstanding"]);
    for m in merchants {
        table.row([
            m.merchant_id.clone(),
            m.full_name(),
            m.phone.clone(),
            if m.upi.is_empty() { "—".to_string() } else { m.upi.clone() },
            m.outstanding.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_table() {
        let merchants: Vec<Merchant> = serde_json::from_value(json!([
            { "_id": "a", "merchantId": "TW-1", "firstName": "Asha", "lastName": "Rao",
              "phone": "9000000001", "upi": "", "outstanding": 1520.5 }
        ]))
        .unwrap();
        let text = balance_table(&merchants).render();
        let row = text.lines().nth(2).unwrap();
        assert!(row.starts_with("TW-1"));
        assert!(row.contains("Asha Rao"));
        assert!(row.contains("—"));
        assert!(row.ends_with("₹ 1520.50"));
    }
}
