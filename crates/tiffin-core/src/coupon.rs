//! # Coupon Form
//!
//! Turns what the operator typed into the body of `POST /coupon/`.
//!
//! ## Normalisation
//! ```text
//! ┌────────────────────┬───────────────────────────────────────────┐
//! │ Field              │ Rule                                      │
//! ├────────────────────┼───────────────────────────────────────────┤
//! │ code               │ trimmed, upper-cased, required            │
//! │ discount           │ ""     → 0                                │
//! │                    │ "15"   → Percent(15)                      │
//! │                    │ "BOGO" → Label("BOGO")                    │
//! │ min_order          │ rupees, not negative                      │
//! │ max_value          │ sent only when > 0                        │
//! │ expiry             │ YYYY-MM-DD at 00:00 UTC                   │
//! └────────────────────┴───────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{date_at_utc_midnight, Discount, NewCoupon};

/// Raw coupon input.
#[derive(Debug, Clone, Default)]
pub struct CouponForm {
    pub code: String,
    pub discount: String,
    pub min_order: f64,
    pub max_value: Option<f64>,
    /// Calendar date, `YYYY-MM-DD`.
    pub expiry: String,
}

impl CouponForm {
    /// Validates and normalises the form.
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::coupon::CouponForm;
    /// use tiffin_core::types::Discount;
    ///
    /// let payload = CouponForm {
    ///     code: "welcome10".into(),
    ///     discount: "10".into(),
    ///     min_order: 199.0,
    ///     max_value: Some(0.0),
    ///     expiry: "2025-03-31".into(),
    /// }
    /// .into_payload()
    /// .unwrap();
    ///
    /// assert_eq!(payload.code, "WELCOME10");
    /// assert_eq!(payload.discount, Discount::Percent(10.0));
    /// assert!(payload.max_value.is_none());
    /// ```
    pub fn into_payload(self) -> Result<NewCoupon, ValidationError> {
        let code = self.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError::required("code"));
        }

        let discount = parse_discount(&self.discount);

        if !self.min_order.is_finite() || self.min_order < 0.0 {
            return Err(ValidationError::MustBePositive {
                field: "minOrder".to_string(),
            });
        }

        let max_value = self
            .max_value
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(Money::from_rupees);

        let expiry = self.expiry.trim();
        if expiry.is_empty() {
            return Err(ValidationError::required("expiryDate"));
        }
        let date = NaiveDate::parse_from_str(expiry, "%Y-%m-%d")
            .map_err(|_| ValidationError::invalid("expiryDate", "expected YYYY-MM-DD"))?;

        Ok(NewCoupon {
            code,
            discount,
            min_order: Money::from_rupees(self.min_order),
            max_value,
            expiry_date: date_at_utc_midnight(date),
        })
    }
}

fn parse_discount(raw: &str) -> Discount {
    let raw = raw.trim();
    if raw.is_empty() {
        return Discount::Percent(0.0);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Discount::Percent(n),
        _ => Discount::Label(raw.to_string()),
    }
}
