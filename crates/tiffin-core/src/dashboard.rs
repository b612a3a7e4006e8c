//! Dashboard figures derived from the analytics endpoints.

use serde::Serialize;

use crate::money::Money;
use crate::types::{AnalyticsOverview, TopItem};

/// The three stat cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: u64,
    pub total_revenue: Money,
    pub store_open: bool,
}

impl DashboardStats {
    pub fn new(overview: &AnalyticsOverview, store_open: bool) -> Self {
        DashboardStats {
            total_orders: overview.total_orders,
            total_revenue: overview.total_revenue,
            store_open,
        }
    }

    pub fn store_label(&self) -> &'static str {
        if self.store_open {
            "Open"
        } else {
            "Closed"
        }
    }
}

/// One slice of the revenue pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueShare {
    pub name: String,
    pub revenue: Money,
    /// Basis points of the top-items total (10000 = 100%).
    pub share_bps: u32,
}

impl RevenueShare {
    /// `"42.15%"`.
    pub fn percent_label(&self) -> String {
        format!("{}.{:02}%", self.share_bps / 100, self.share_bps % 100)
    }
}

/// Share of the top-items revenue for each item, in input order.
pub fn revenue_shares(items: &[TopItem]) -> Vec<RevenueShare> {
    let total: Money = items.iter().map(|i| i.total_revenue).sum();
    items
        .iter()
        .map(|i| RevenueShare {
            name: i.name.clone(),
            revenue: i.total_revenue,
            share_bps: i.total_revenue.share_bps(total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(name: &str, rupees: i64) -> TopItem {
        TopItem {
            name: name.to_string(),
            total_quantity: 1,
            total_revenue: Money::from_paise(rupees * 100),
        }
    }

    #[test]
    fn test_revenue_shares() {
        let shares = revenue_shares(&[top("Thali", 300), top("Chai", 100)]);
        assert_eq!(shares[0].share_bps, 7500);
        assert_eq!(shares[1].share_bps, 2500);
        assert_eq!(shares[0].percent_label(), "75.00%");
    }

    #[test]
    fn test_zero_revenue_has_zero_share() {
        let shares = revenue_shares(&[top("Thali", 0)]);
        assert_eq!(shares[0].share_bps, 0);
        assert!(revenue_shares(&[]).is_empty());
    }

    #[test]
    fn test_stats() {
        let overview = AnalyticsOverview {
            total_orders: 42,
            total_revenue: Money::from_paise(1_234_500),
        };
        let stats = DashboardStats::new(&overview, false);
        assert_eq!(stats.total_orders, 42);
        assert_eq!(stats.store_label(), "Closed");
        assert_eq!(stats.total_revenue.to_string(), "₹ 12345");
    }
}
