//! # Screen Commands
//!
//! One module per dashboard screen.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs            ◄─── Ctx shared by every screen
//! ├── auth.rs           ◄─── OTP login, logout, status
//! ├── dashboard.rs      ◄─── stats, orders per day, top items, store toggle
//! ├── items.rs          ◄─── catalog tree, sync, stock, image
//! ├── banners.rs        ◄─── list, upload, delete
//! ├── coupons.rs        ◄─── list, create, delete, enable/disable
//! ├── notifications.rs  ◄─── send, local history
//! ├── points.rs         ◄─── tiers and quotes
//! ├── settlements.rs    ◄─── balances, settle-all, UPI
//! ├── extra.rs          ◄─── extra cash, extra percentage
//! ├── qrcodes.rs        ◄─── deep links, poster PNGs
//! ├── refund.rs         ◄─── loyalty refund
//! └── config.rs         ◄─── init, show, path
//! ```
//!
//! ## Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tiffin-admin coupons list                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::coupons::run(&ctx, CouponsCommand::List)                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ctx.client.list_coupons()  ──► GET {api}/coupon/                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ctx.out: table on stdout, or the parsed JSON with --json               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod banners;
pub mod config;
pub mod coupons;
pub mod dashboard;
pub mod extra;
pub mod items;
pub mod notifications;
pub mod points;
pub mod qrcodes;
pub mod refund;
pub mod settlements;

use tiffin_api::ApiClient;

use crate::config::AdminConfig;
use crate::output::Output;

/// What every screen gets handed.
pub struct Ctx {
    pub client: ApiClient,
    pub config: AdminConfig,
    pub out: Output,
}
