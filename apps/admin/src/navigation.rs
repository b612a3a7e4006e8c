//! The tab list: every screen the console has, in menu order.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Dashboard,
    Items,
    Banners,
    Coupons,
    Notifications,
    Points,
    MerchantSettlements,
    MerchantExtraSettlements,
    MerchantQrcodes,
    Refund,
}

impl Screen {
    /// All tabs, in the order they are listed.
    pub const ALL: [Screen; 10] = [
        Screen::Dashboard,
        Screen::Items,
        Screen::Banners,
        Screen::Coupons,
        Screen::Notifications,
        Screen::Points,
        Screen::MerchantSettlements,
        Screen::MerchantExtraSettlements,
        Screen::MerchantQrcodes,
        Screen::Refund,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Items => "items",
            Screen::Banners => "banners",
            Screen::Coupons => "coupons",
            Screen::Notifications => "notifications",
            Screen::Points => "points",
            Screen::MerchantSettlements => "merchant-settlements",
            Screen::MerchantExtraSettlements => "merchant-extra-settlements",
            Screen::MerchantQrcodes => "merchant-qrcodes",
            Screen::Refund => "refund",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Items => "Items",
            Screen::Banners => "Banners",
            Screen::Coupons => "Coupons",
            Screen::Notifications => "Notifications",
            Screen::Points => "Points Config",
            Screen::MerchantSettlements => "Settlements",
            Screen::MerchantExtraSettlements => "Extra Cash Settlement",
            Screen::MerchantQrcodes => "QR Codes",
            Screen::Refund => "Refund System",
        }
    }

    /// Looks a tab up by id. Unknown or missing ids land on the dashboard.
    pub fn from_id(id: Option<&str>) -> Screen {
        let Some(id) = id.map(str::trim) else {
            return Screen::Dashboard;
        };
        Screen::ALL
            .into_iter()
            .find(|s| s.id().eq_ignore_ascii_case(id))
            .unwrap_or(Screen::Dashboard)
    }

    /// The subcommand that renders this screen's default view.
    pub fn command(&self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard show",
            Screen::Items => "items list",
            Screen::Banners => "banners list",
            Screen::Coupons => "coupons list",
            Screen::Notifications => "notifications history",
            Screen::Points => "points list",
            Screen::MerchantSettlements => "settlements list",
            Screen::MerchantExtraSettlements => "extra-settlements list",
            Screen::MerchantQrcodes => "qrcodes list",
            Screen::Refund => "refund --phone <phone> --points <n>",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_order() {
        let ids: Vec<_> = Screen::ALL.iter().map(Screen::id).collect();
        assert_eq!(
            ids,
            vec![
                "dashboard",
                "items",
                "banners",
                "coupons",
                "notifications",
                "points",
                "merchant-settlements",
                "merchant-extra-settlements",
                "merchant-qrcodes",
                "refund",
            ]
        );
    }

    #[test]
    fn test_from_id() {
        assert_eq!(Screen::from_id(Some("coupons")), Screen::Coupons);
        assert_eq!(Screen::from_id(Some(" Merchant-QRCodes ")), Screen::MerchantQrcodes);
        assert_eq!(Screen::from_id(Some("reports")), Screen::Dashboard);
        assert_eq!(Screen::from_id(None), Screen::Dashboard);
        assert_eq!(Screen::default(), Screen::Dashboard);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Screen::Points.label(), "Points Config");
        assert_eq!(Screen::MerchantExtraSettlements.to_string(), "Extra Cash Settlement");
    }
}
