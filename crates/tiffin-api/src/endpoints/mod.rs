//! Endpoint functions, one `impl ApiClient` block per API area.

mod analytics;
mod auth;
mod banners;
mod catalog;
mod coupons;
mod loyalty;
mod merchants;
mod notifications;
mod points;
