//! Refund screen: credits loyalty points back to a customer.

use tiffin_core::LoyaltyCredit;
use tracing::info;

use super::Ctx;
use crate::cli::RefundArgs;
use crate::error::AppResult;

pub async fn run(ctx: &Ctx, args: RefundArgs) -> AppResult<()> {
    let credit = LoyaltyCredit {
        phone: args.phone.trim().to_string(),
        points: args.points,
    };
    let env = ctx.client.add_loyalty_points(&credit).await?;
    info!(phone = %credit.phone, accepted = env.status, "Refund processed");

    if ctx.out.json {
        return ctx.out.json(&env);
    }
    let line = match (&env.data, env.status) {
        (Some(balance), true) => format!(
            "Refunded {} points to {}. New balance: {}",
            credit.points, credit.phone, balance.loyalty_points
        ),
        _ => env
            .message
            .clone()
            .unwrap_or_else(|| "Refund was not accepted.".to_string()),
    };
    println!("{}", line);
    Ok(())
}
