//! # State Module
//!
//! Local state the console keeps between invocations. Each process is
//! short-lived, so state lives in small files rather than in memory.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Local State Files                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────┐      │
//! │  │  Session             │        │  NotificationHistory         │      │
//! │  │  session.toml        │        │  notifications.json          │      │
//! │  │                      │        │                              │      │
//! │  │  authenticated       │        │  [ newest, ..., oldest ]     │      │
//! │  │  phone, token        │        │  id, title, message, sentAt  │      │
//! │  └──────────────────────┘        └──────────────────────────────┘      │
//! │                                                                         │
//! │  Both live in the platform data dir unless overridden by               │
//! │  TIFFIN_SESSION_PATH / TIFFIN_HISTORY_PATH.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod history;
mod session;

pub use history::NotificationHistory;
pub use session::{AuthContext, OtpService, Session, SESSION_FILE_NAME};
