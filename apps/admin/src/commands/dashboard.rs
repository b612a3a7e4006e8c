//! # Dashboard Screen
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tokio::try_join!                                                       │
//! │    ├── GET /store/status              ──► Store: Open / Closed          │
//! │    ├── GET /analytics/overview        ──► Total orders, revenue         │
//! │    ├── GET /analytics/orders-per-day  ──► per-day table                 │
//! │    └── GET /analytics/top-items       ──► top items + revenue share     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tiffin_core::dashboard::{revenue_shares, DashboardStats, RevenueShare};
use tiffin_core::{DailyOrders, TopItem};

use super::Ctx;
use crate::cli::{DashboardCommand, StoreState};
use crate::error::AppResult;
use crate::output::Table;

/// Everything the dashboard shows, as printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub orders_per_day: Vec<DailyOrders>,
    pub top_items: Vec<TopItem>,
    pub revenue_shares: Vec<RevenueShare>,
}

pub async fn run(ctx: &Ctx, cmd: DashboardCommand) -> AppResult<()> {
    match cmd {
        DashboardCommand::Show => show(ctx).await,
        DashboardCommand::Store { state, reason } => {
            let open = state == StoreState::Open;
            let reason = if open { None } else { reason.as_deref() };
            ctx.client.set_store_status(open, reason).await?;
            ctx.out.message(if open { "Store is now open." } else { "Store is now closed." })
        }
    }
}

async fn show(ctx: &Ctx) -> AppResult<()> {
    let client = &ctx.client;
    let (store_open, overview, per_day, top) = tokio::try_join!(
        client.store_status(),
        client.analytics_overview(),
        client.orders_per_day(),
        client.top_items(),
    )?;

    let view = DashboardView {
        stats: DashboardStats::new(&overview, store_open),
        revenue_shares: revenue_shares(&top),
        orders_per_day: per_day,
        top_items: top,
    };

    ctx.out.emit(&view, || print!("{}", render(&view)))
}

fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    let mut cards = Table::new(["Total Orders", "Total Revenue", "Store"]);
    cards.row([
        view.stats.total_orders.to_string(),
        view.stats.total_revenue.to_string(),
        view.stats.store_label().to_string(),
    ]);
    out.push_str(&cards.render());

    out.push_str("\nOrders per day\n");
    let mut days = Table::new(["Date", "Orders"]);
    for d in &view.orders_per_day {
        days.row([d.date.clone(), d.count.to_string()]);
    }
    out.push_str(&or_empty(&days, "No orders yet."));

    out.push_str("\nTop items\n");
    let mut top = Table::new(["Item", "Qty", "Revenue", "Share"]);
    for (item, share) in view.top_items.iter().zip(&view.revenue_shares) {
        top.row([
            item.name.clone(),
            item.total_quantity.to_string(),
            item.total_revenue.to_string(),
            share.percent_label(),
        ]);
    }
    out.push_str(&or_empty(&top, "No sales yet."));

    out
}

fn or_empty(table: &Table, empty: &str) -> String {
    if table.is_empty() {
        format!("{}\n", empty)
    } else {
        table.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiffin_core::{AnalyticsOverview, Money};

    #[test]
    fn test_render_dashboard() {
        let top = vec![
            TopItem {
                name: "Veg Thali".into(),
                total_quantity: 30,
                total_revenue: Money::from_paise(300_00),
            },
            TopItem {
                name: "Masala Chai".into(),
                total_quantity: 50,
                total_revenue: Money::from_paise(100_00),
            },
        ];
        let view = DashboardView {
            stats: DashboardStats::new(
                &AnalyticsOverview {
                    total_orders: 80,
                    total_revenue: Money::from_paise(400_00),
                },
                false,
            ),
            orders_per_day: vec![DailyOrders {
                date: "2024-05-01".into(),
                count: 12,
            }],
            revenue_shares: revenue_shares(&top),
            top_items: top,
        };

        let text = render(&view);
        assert!(text.contains("Closed"));
        assert!(text.contains("2024-05-01  12"));
        assert!(text.contains("75.00%"));
        assert!(text.contains("25.00%"));
    }

    #[test]
    fn test_render_empty_lists() {
        let view = DashboardView {
            stats: DashboardStats::new(&AnalyticsOverview::default(), true),
            orders_per_day: vec![],
            top_items: vec![],
            revenue_shares: vec![],
        };
        let text = render(&view);
        assert!(text.contains("No orders yet."));
        assert!(text.contains("No sales yet."));
        assert!(text.contains("Open"));
    }
}
