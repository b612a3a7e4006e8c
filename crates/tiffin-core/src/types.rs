//! # Domain Types
//!
//! Wire shapes of the storefront and merchant REST APIs.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Storefront API (api.sixty6foods.in)      Merchant API                 │
//! │  ───────────────────────────────────      ────────────────             │
//! │  Banner        _id, url, redirect         Merchant   balances, UPI     │
//! │  Coupon        code, discount, expiry     ExtraCash  extra ledger      │
//! │  PointsRange   lower..=upper → points                                  │
//! │  CatalogItem   menu entry + inStock/image                              │
//! │  StoreSettings open / closed                                           │
//! │  TopItem, DailyOrders, AnalyticsOverview                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Storefront documents come from MongoDB and carry `_id`. Merchants also have
//! a business `merchantId`; every merchant endpoint is keyed by that one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Banner
// =============================================================================

/// Promotional image with an optional redirect URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

// =============================================================================
// Coupon
// =============================================================================

/// Coupon discount: a number is a percentage, anything else is a free-form
/// label the storefront interprets (e.g. `"FLAT50"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Discount {
    Percent(f64),
    Label(String),
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::Percent(p) => write!(f, "{}% off", p),
            Discount::Label(l) => write!(f, "{} off", l),
        }
    }
}

/// Discount code with min-order threshold, optional cap and expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: String,
    pub code: String,
    pub discount: Discount,
    pub expiry_date: DateTime<Utc>,
    #[serde(default)]
    pub min_order: Money,
    #[serde(default)]
    pub max_value: Option<Money>,
    #[serde(default)]
    pub enabled: bool,
}

impl Coupon {
    /// A coupon is expired once its expiry instant is in the past.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date < now
    }

    /// The discount cap, only when one is actually set.
    pub fn cap(&self) -> Option<Money> {
        self.max_value.filter(|m| m.is_positive())
    }
}

/// Body of `POST /coupon/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    pub discount: Discount,
    pub min_order: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Money>,
    pub expiry_date: DateTime<Utc>,
}

// =============================================================================
// Notifications
// =============================================================================

/// Body of `POST /notification/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

/// A notification this console has sent (kept locally as history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentNotification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

// =============================================================================
// Loyalty Points
// =============================================================================

/// An order-value bracket mapped to a loyalty-point award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsRange {
    #[serde(rename = "_id")]
    pub id: String,
    pub lower: i64,
    pub upper: i64,
    pub loyalty_points: i64,
}

impl PointsRange {
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Body of `POST /points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPointsRange {
    pub lower: i64,
    pub upper: i64,
    pub loyalty_points: i64,
}

/// Body of the loyalty refund call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyCredit {
    pub phone: String,
    pub points: i64,
}

/// Customer balance returned after a refund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyBalance {
    pub loyalty_points: i64,
}

// =============================================================================
// Merchants
// =============================================================================

/// A payee with an outstanding balance and a UPI id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    #[serde(rename = "_id")]
    pub id: String,
    pub merchant_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub upi: String,
    #[serde(default)]
    pub outstanding: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    /// Extra-cash percentage, 0-100 with two decimals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_percentage: Option<f64>,
}

impl Merchant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One entry of a merchant's "extra cash" ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraCash {
    #[serde(rename = "_id")]
    pub id: String,
    pub merchant_id: String,
    pub amount: Money,
    #[serde(default)]
    pub is_settled: bool,
    #[serde(default)]
    pub settlement_id: Option<String>,
}

/// Sum of the entries not yet settled.
pub fn unsettled_total(records: &[ExtraCash]) -> Money {
    records
        .iter()
        .filter(|r| !r.is_settled)
        .map(|r| r.amount)
        .sum()
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePrice {
    pub schedule_id: String,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantValue {
    pub name: String,
    pub value: String,
}

/// A menu entry as stored in the latest catalog snapshot.
///
/// Most fields come verbatim from the upstream menu provider. `in_stock` and
/// `image` are added by the server's normalisation step and are the only two
/// fields this console edits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Item kind, "Simple" for plain items.
    #[serde(rename = "type", default)]
    pub item_type: String,
    pub item_id: String,
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_prices: Option<Vec<SchedulePrice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measuring_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_price_includes_tax: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny_discount: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_tag_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_set_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_code: Option<String>,
    /// "Goods" for physical items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_nature: Option<String>,
    /// "Active" for sellable items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_tax_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_attributes: Option<Vec<VariantAttribute>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_values: Option<Vec<VariantValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<Map<String, Value>>,
}

impl CatalogItem {
    /// Missing stock flag counts as out of stock.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.in_stock.unwrap_or(false)
    }

    /// Image URL when one is set and non-empty.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    #[serde(default)]
    pub sub_category_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
}

/// The latest catalog snapshot.
///
/// Only `items` and `categories` are interpreted. Every other top-level key
/// (coupon providers, charges, taxes, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogPayload {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial update body for `PATCH /menu/item/{itemId}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// =============================================================================
// Store & Analytics
// =============================================================================

/// Whether the storefront is accepting orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub is_open: bool,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closure_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_revenue: Money,
}

/// Orders placed on one day; `_id` is the day label from the aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOrders {
    #[serde(rename = "_id")]
    pub date: String,
    #[serde(default)]
    pub count: u64,
}

/// A best-selling item; `_id` is the item name from the aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    #[serde(rename = "_id")]
    pub name: String,
    #[serde(default)]
    pub total_quantity: u64,
    #[serde(default)]
    pub total_revenue: Money,
}

/// Parses a `YYYY-MM-DD` calendar date into UTC midnight.
pub fn date_at_utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
