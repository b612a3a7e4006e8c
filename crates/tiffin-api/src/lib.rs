//! # tiffin-api: REST Client for the Tiffin Storefront
//!
//! Typed async access to the storefront API and the merchant service.
//!
//! ## Endpoint Areas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ApiClient                                     │
//! │                                                                         │
//! │  Storefront (api_base)                 Merchant service (merchant_base) │
//! │  ─────────────────────                 ───────────────────────────────  │
//! │  banners        list/upload/delete     balances, unsettled balances     │
//! │  coupons        list/create/delete/    settle-all                       │
//! │                 enable                 UPI update                       │
//! │  points         list/create/delete     extra cash ledger + settle       │
//! │  notifications  send                   extra percentage                 │
//! │  menu           latest/sync/edit                                        │
//! │  store          status get/set                                          │
//! │  analytics      overview/per-day/top                                    │
//! │  user/loyalty   add points                                              │
//! │  auth           send/verify OTP                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function performs exactly one HTTP request. Errors surface as
//! [`ApiError`]; nothing is retried.
//!
//! ## Example
//! ```rust,no_run
//! use tiffin_api::{ApiClient, ApiConfig};
//!
//! # async fn run() -> tiffin_api::ApiResult<()> {
//! let client = ApiClient::new(ApiConfig::default())?;
//! for coupon in client.list_coupons().await? {
//!     println!("{} {}", coupon.code, coupon.discount);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod endpoints;
pub mod error;

pub use client::{ApiClient, Envelope};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
