//! Banners screen: list, upload, delete.

use tiffin_core::validation::validate_banner_file;
use tiffin_core::Banner;
use tracing::info;

use super::Ctx;
use crate::cli::BannersCommand;
use crate::error::AppResult;
use crate::output::Table;

pub async fn run(ctx: &Ctx, cmd: BannersCommand) -> AppResult<()> {
    match cmd {
        BannersCommand::List => {
            let banners = ctx.client.list_banners().await?;
            ctx.out.emit(&banners, || banner_table(&banners).print_or("No banners."))
        }
        BannersCommand::Upload { file, redirect } => {
            validate_banner_file(&file)?;
            let redirect = redirect.as_deref().map(str::trim).filter(|r| !r.is_empty());
            let message = ctx.client.upload_banner(&file, redirect).await?;
            info!(file = %file.display(), "Banner uploaded");
            ctx.out
                .message(message.as_deref().unwrap_or("Banner uploaded."))
        }
        BannersCommand::Delete { id } => {
            ctx.out.confirm("Delete this banner?")?;
            let message = ctx.client.delete_banner(&id).await?;
            ctx.out
                .message(message.as_deref().unwrap_or("Banner deleted."))
        }
    }
}

fn banner_table(banners: &[Banner]) -> Table {
    let mut table = Table::new(["ID", "Image", "Redirect"]);
    for b in banners {
        table.row([
            b.id.clone(),
            b.url.clone(),
            b.redirect.clone().unwrap_or_else(|| "—".to_string()),
        ]);
    }
    table
}
