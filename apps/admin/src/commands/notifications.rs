//! Notifications screen: send a push, show what was sent from here.

use chrono::Utc;
use tiffin_core::validation::validate_notification;
use tiffin_core::NotificationPayload;
use tracing::{info, warn};

use super::Ctx;
use crate::cli::NotificationsCommand;
use crate::error::AppResult;
use crate::output::Table;
use crate::state::NotificationHistory;

pub async fn run(ctx: &Ctx, cmd: NotificationsCommand) -> AppResult<()> {
    let path = NotificationHistory::default_path()?;

    match cmd {
        NotificationsCommand::Send { title, message } => {
            validate_notification(&title, &message)?;
            let payload = NotificationPayload {
                title: title.trim().to_string(),
                body: message.trim().to_string(),
            };
            let reply = ctx.client.send_notification(&payload).await?;
            info!(title = %payload.title, "Notification sent");

            let print = || println!("{}", reply.as_deref().unwrap_or("Notification sent successfully!"));
            let mut history = NotificationHistory::load_or_empty(path);
            match history.record(&payload.title, &payload.body, Utc::now()) {
                Ok(sent) => ctx.out.emit(sent, print),
                Err(e) => {
                    warn!(path = ?history.path(), error = %e, "Notification not recorded in history");
                    ctx.out.emit(&payload, print)
                }
            }
        }
        NotificationsCommand::History => {
            let history = NotificationHistory::load(path)?;
            let entries = history.entries();
            ctx.out.emit(entries, || {
                let mut table = Table::new(["Sent", "Title", "Message"]);
                for n in entries {
                    table.row([
                        n.sent_at.format("%Y-%m-%d %H:%M").to_string(),
                        n.title.clone(),
                        n.message.clone(),
                    ]);
                }
                table.print_or("No notifications sent yet.");
            })
        }
    }
}
