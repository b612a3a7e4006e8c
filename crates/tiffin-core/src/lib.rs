//! # tiffin-core: Pure Domain Logic for the Tiffin Admin Console
//!
//! Everything the console decides on its own, before or after talking to the
//! storefront and merchant APIs. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tiffin Admin Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 tiffin-admin (CLI screens)                      │   │
//! │  │   dashboard, items, banners, coupons, points, settlements, qr   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tiffin-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  coupon   │  │ validation│  │   │
//! │  │   │  wire DTO │  │ tree/find │  │   form    │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  points   │  │ deeplink  │  │ dashboard │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tiffin-api (HTTP client)                        │   │
//! │  │          one async function per REST endpoint                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (Banner, Coupon, Merchant, CatalogItem, ...)
//! - [`money`] - Rupee amounts as integer paise
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation
//! - [`coupon`] - Coupon form normalisation
//! - [`catalog`] - Menu filtering and category grouping
//! - [`points`] - Loyalty tier lookup
//! - [`deeplink`] - Merchant QR deep links
//! - [`dashboard`] - Stat cards and revenue shares
//!
//! ## Example Usage
//!
//! ```rust
//! use tiffin_core::validation::parse_extra_percentage;
//! use tiffin_core::Money;
//!
//! let pct = parse_extra_percentage("2.5").unwrap();
//! assert_eq!(pct, 2.5);
//!
//! let owed = Money::from_rupees(1520.5);
//! assert_eq!(owed.to_string(), "₹ 1520.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod coupon;
pub mod dashboard;
pub mod deeplink;
pub mod error;
pub mod money;
pub mod points;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Phone numbers allowed to request a login OTP when no allowlist is
/// configured.
pub const DEFAULT_ALLOWED_PHONES: &[&str] = &["8950291327", "9719697197"];

/// Group id for catalog items that have no category.
pub const NO_CATEGORY_ID: &str = "__NO_CATEGORY__";

/// Marker stored as the session token after a successful OTP verification.
///
/// The auth endpoint returns no token; the marker only records that a login
/// happened.
pub const TOKEN_MARKER: &str = "dummy";
