//! # Loyalty Tiers
//!
//! Order-value brackets and the points they award.
//!
//! ```text
//!   ₹0 ─────── ₹199 │ ₹200 ─────── ₹499 │ ₹500 ─────── ₹9999
//!      5 points     │     15 points     │     40 points
//! ```
//!
//! Tiers are meant to be disjoint but the server does not enforce it.
//! [`find_overlap`] lets the console warn before submitting an overlapping
//! tier; it does not block the request.

use crate::money::Money;
use crate::types::{NewPointsRange, PointsRange};

/// Loyalty points for an order of `order_value`.
///
/// Tiers are matched in ascending `lower` order and the first one containing
/// the whole-rupee amount wins.
///
/// ## Example
/// ```rust
/// use tiffin_core::money::Money;
/// use tiffin_core::points::award_for;
/// use tiffin_core::types::PointsRange;
///
/// let tiers = vec![PointsRange { id: "a".into(), lower: 0, upper: 199, loyalty_points: 5 }];
/// assert_eq!(award_for(&tiers, Money::from_paise(15000)), Some(5));
/// assert_eq!(award_for(&tiers, Money::from_paise(25000)), None);
/// ```
pub fn award_for(ranges: &[PointsRange], order_value: Money) -> Option<i64> {
    let rupees = order_value.rupees();
    let mut sorted: Vec<&PointsRange> = ranges.iter().collect();
    sorted.sort_by_key(|r| r.lower);
    sorted
        .into_iter()
        .find(|r| r.contains(rupees))
        .map(|r| r.loyalty_points)
}

/// First existing tier sharing at least one value with `candidate`.
pub fn find_overlap<'a>(ranges: &'a [PointsRange], candidate: &NewPointsRange) -> Option<&'a PointsRange> {
    ranges
        .iter()
        .find(|r| r.lower <= candidate.upper && candidate.lower <= r.upper)
}

/// Tiers ordered for display.
pub fn sorted_ranges(ranges: &[PointsRange]) -> Vec<PointsRange> {
    let mut out = ranges.to_vec();
    out.sort_by_key(|r| (r.lower, r.upper));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(id: &str, lower: i64, upper: i64, points: i64) -> PointsRange {
        PointsRange {
            id: id.to_string(),
            lower,
            upper,
            loyalty_points: points,
        }
    }

    fn tiers() -> Vec<PointsRange> {
        vec![tier("c", 500, 9999, 40), tier("a", 0, 199, 5), tier("b", 200, 499, 15)]
    }

    #[test]
    fn test_award_boundaries() {
        let t = tiers();
        assert_eq!(award_for(&t, Money::from_paise(0)), Some(5));
        assert_eq!(award_for(&t, Money::from_paise(19999)), Some(5));
        assert_eq!(award_for(&t, Money::from_paise(20000)), Some(15));
        assert_eq!(award_for(&t, Money::from_paise(999_900)), Some(40));
        assert_eq!(award_for(&t, Money::from_paise(1_000_000)), None);
    }

    #[test]
    fn test_overlap_detection() {
        let t = tiers();
        let overlapping = NewPointsRange {
            lower: 450,
            upper: 600,
            loyalty_points: 1,
        };
        assert_eq!(find_overlap(&t, &overlapping).map(|r| r.id.as_str()), Some("c"));

        let touching = NewPointsRange {
            lower: 10_000,
            upper: 20_000,
            loyalty_points: 1,
        };
        assert!(find_overlap(&t, &touching).is_none());
    }

    #[test]
    fn test_sorted_ranges() {
        let ids: Vec<String> = sorted_ranges(&tiers()).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
