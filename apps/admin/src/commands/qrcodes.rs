//! # QR Codes Screen
//!
//! Merchant onboarding links and their printable posters.
//!
//! ```text
//! qrcodes generate TW-1 TW-7 --out posters/
//!     │
//!     ├── GET merchants-unsettled-balances   (ids must be known merchants)
//!     ├── merchant_link(cfg, id)             deep link per merchant
//!     └── PosterRenderer::write              posters/merchant-qr-TW-1.png
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tiffin_core::deeplink::{merchant_link, poster_file_name, DeepLinkConfig};
use tiffin_core::{CoreError, Merchant};
use tracing::{info, warn};

use super::Ctx;
use crate::cli::QrCommand;
use crate::error::AppResult;
use crate::output::Table;
use crate::poster::PosterRenderer;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkRow {
    merchant_id: String,
    name: String,
    link: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PosterFile {
    merchant_id: String,
    path: PathBuf,
}

pub async fn run(ctx: &Ctx, cmd: QrCommand) -> AppResult<()> {
    let deep_link = &ctx.config.qr.deep_link;

    match cmd {
        QrCommand::List => {
            let merchants = ctx.client.merchants_unsettled_balances().await?;
            let rows = link_rows(&merchants, deep_link);
            ctx.out.emit(&rows, || {
                let mut table = Table::new(["Merchant", "Name", "Link"]);
                for r in &rows {
                    table.row([r.merchant_id.clone(), r.name.clone(), r.link.clone()]);
                }
                table.print_or("No merchants.");
            })
        }
        QrCommand::Link { merchant_id } => {
            let link = merchant_link(deep_link, merchant_id.trim());
            ctx.out
                .emit(&serde_json::json!({ "merchantId": merchant_id, "link": link }), || {
                    println!("{}", link)
                })
        }
        QrCommand::Generate { merchant_ids, out } => {
            let merchants = ctx.client.merchants_unsettled_balances().await?;
            let targets = select_merchants(&merchants, &merchant_ids)?;

            let dir = out.unwrap_or_else(|| ctx.config.qr.output_dir.clone());
            std::fs::create_dir_all(&dir)?;

            let renderer = PosterRenderer::from_settings(&ctx.config.qr)?;
            if !renderer.has_label() {
                warn!("No qr.label_font configured, posters will not show the merchant id");
            }

            let mut written = Vec::with_capacity(targets.len());
            for m in targets {
                let path = dir.join(poster_file_name(&m.merchant_id));
                let link = merchant_link(deep_link, &m.merchant_id);
                renderer.write(&link, &m.merchant_id, &path)?;
                info!(merchant = %m.merchant_id, path = %path.display(), "Poster written");
                written.push(PosterFile {
                    merchant_id: m.merchant_id.clone(),
                    path,
                });
            }

            ctx.out.emit(&written, || {
                if written.is_empty() {
                    println!("No merchants.");
                }
                for f in &written {
                    println!("{}", f.path.display());
                }
            })
        }
    }
}

fn link_rows(merchants: &[Merchant], cfg: &DeepLinkConfig) -> Vec<LinkRow> {
    merchants
        .iter()
        .map(|m| LinkRow {
            merchant_id: m.merchant_id.clone(),
            name: m.full_name(),
            link: merchant_link(cfg, &m.merchant_id),
        })
        .collect()
}

/// All merchants when `ids` is empty, otherwise the named ones in the given
/// order.
fn select_merchants<'a>(merchants: &'a [Merchant], ids: &[String]) -> AppResult<Vec<&'a Merchant>> {
    if ids.is_empty() {
        return Ok(merchants.iter().collect());
    }
    ids.iter()
        .map(|id| {
            let id = id.trim();
            merchants
                .iter()
                .find(|m| m.merchant_id == id)
                .ok_or_else(|| CoreError::MerchantNotFound(id.to_string()).into())
        })
        .collect()
}
