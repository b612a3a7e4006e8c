//! Coupons screen.

use chrono::{DateTime, Utc};
use tiffin_core::coupon::CouponForm;
use tiffin_core::Coupon;
use tracing::info;

use super::Ctx;
use crate::cli::{CouponsCommand, CreateCouponArgs};
use crate::error::AppResult;
use crate::output::Table;

pub async fn run(ctx: &Ctx, cmd: CouponsCommand) -> AppResult<()> {
    match cmd {
        CouponsCommand::List => {
            let coupons = ctx.client.list_coupons().await?;
            let now = Utc::now();
            ctx.out
                .emit(&coupons, || coupon_table(&coupons, now).print_or("No coupons."))
        }
        CouponsCommand::Create(args) => {
            let payload = form(args).into_payload()?;
            let message = ctx.client.create_coupon(&payload).await?;
            info!(code = %payload.code, "Coupon created");
            ctx.out.emit(&payload, || {
                println!("{}", message.as_deref().unwrap_or("Coupon created."));
            })
        }
        CouponsCommand::Delete { id } => {
            ctx.out.confirm("Delete this coupon?")?;
            let message = ctx.client.delete_coupon(&id).await?;
            ctx.out
                .message(message.as_deref().unwrap_or("Coupon deleted."))
        }
        CouponsCommand::Enable { id } => set_enabled(ctx, &id, true).await,
        CouponsCommand::Disable { id } => set_enabled(ctx, &id, false).await,
    }
}

async fn set_enabled(ctx: &Ctx, id: &str, enabled: bool) -> AppResult<()> {
    ctx.client.set_coupon_enabled(id, enabled).await?;
    ctx.out.message(if enabled { "Coupon enabled." } else { "Coupon disabled." })
}

fn form(args: CreateCouponArgs) -> CouponForm {
    CouponForm {
        code: args.code,
        discount: args.discount,
        min_order: args.min_order,
        max_value: args.max_value,
        expiry: args.expiry,
    }
}

fn coupon_table(coupons: &[Coupon], now: DateTime<Utc>) -> Table {
    let mut table = Table::new(["ID", "Code", "Discount", "Min order", "Cap", "Expires", "Status"]);
    for c in coupons {
        let status = if c.is_expired(now) {
            "expired"
        } else if c.enabled {
            "enabled"
        } else {
            "disabled"
        };
        table.row([
            c.id.clone(),
            c.code.clone(),
            c.discount.to_string(),
            c.min_order.to_string(),
            c.cap().map(|m| m.to_string()).unwrap_or_else(|| "—".into()),
            c.expiry_date.format("%Y-%m-%d").to_string(),
            status.to_string(),
        ]);
    }
    table
}
