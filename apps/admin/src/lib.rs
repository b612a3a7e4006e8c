//! # tiffin-admin: Storefront Admin Console
//!
//! The dashboard screens as subcommands: every screen fetches from the
//! storefront or merchant API, prints, and offers its create/update/delete
//! actions.
//!
//! ## Invocation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Invocation                                    │
//! │                                                                         │
//! │  1. Parse arguments (clap) ──────────────────────────────────────────► │
//! │     • --json, --config, -v, -y are global                               │
//! │                                                                         │
//! │  2. Initialize Logging ──────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, stderr only                   │
//! │     • Default: warn,tiffin=info; RUST_LOG overrides                     │
//! │                                                                         │
//! │  3. Load admin.toml + TIFFIN_* env ──────────────────────────────────► │
//! │     • `config` subcommands run before this step                         │
//! │                                                                         │
//! │  4. Session gate ────────────────────────────────────────────────────► │
//! │     • everything except auth / menu / config needs session.toml         │
//! │       with authenticated = true                                         │
//! │                                                                         │
//! │  5. Dispatch to commands::<screen>::run ─────────────────────────────► │
//! │                                                                         │
//! │  6. Exit status from AppError::exit_code                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod navigation;
pub mod output;
pub mod poster;
pub mod state;

use std::path::Path;

use serde_json::json;
use tiffin_api::ApiClient;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{
    BannersCommand, Cli, Command, CouponsCommand, DashboardCommand, ExtraSettlementsCommand, ItemsCommand,
    NotificationsCommand, PointsCommand, QrCommand, SettlementsCommand,
};
use commands::Ctx;
use config::AdminConfig;
use navigation::Screen;
use output::{Output, Table};
use state::{AuthContext, Session};

pub use error::{AppError, AppResult};

/// Installs the stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,tiffin=info",
        1 => "info,tiffin=debug",
        _ => "debug,tiffin=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs one parsed command line.
pub async fn run(cli: Cli) -> AppResult<()> {
    if let Command::Config(cmd) = cli.command {
        let out = Output::new(cli.json, cli.yes);
        return commands::config::run(cli.config.as_deref(), &out, cmd);
    }

    let config = AdminConfig::load(cli.config)?;
    let out = Output::new(cli.json || config.output.json, cli.yes);
    let client = ApiClient::new(config.api.clone())?;
    let ctx = Ctx { client, config, out };

    if cli.command.requires_session() {
        require_session(&ctx, &Session::default_path()?)?;
    }

    dispatch(&ctx, cli.command).await
}

/// Refuses to go on unless the session file at `path` is signed in.
fn require_session(ctx: &Ctx, path: &Path) -> AppResult<()> {
    let auth = AuthContext::load(&ctx.client, &ctx.config.auth.allowed_phones, path.to_path_buf())?;
    auth.require().map_err(|e| {
        debug!(?path, "No authenticated session");
        e
    })
}

async fn dispatch(ctx: &Ctx, command: Command) -> AppResult<()> {
    match command {
        Command::Auth(cmd) => commands::auth::run(ctx, cmd, Session::default_path()?).await,
        Command::Menu => menu(&ctx.out),
        Command::Open { screen } => open(ctx, Screen::from_id(screen.as_deref())).await,
        Command::Dashboard(cmd) => commands::dashboard::run(ctx, cmd).await,
        Command::Items(cmd) => commands::items::run(ctx, cmd).await,
        Command::Banners(cmd) => commands::banners::run(ctx, cmd).await,
        Command::Coupons(cmd) => commands::coupons::run(ctx, cmd).await,
        Command::Notifications(cmd) => commands::notifications::run(ctx, cmd).await,
        Command::Points(cmd) => commands::points::run(ctx, cmd).await,
        Command::Settlements(cmd) => commands::settlements::run(ctx, cmd).await,
        Command::ExtraSettlements(cmd) => commands::extra::run(ctx, cmd).await,
        Command::Qrcodes(cmd) => commands::qrcodes::run(ctx, cmd).await,
        Command::Refund(args) => commands::refund::run(ctx, args).await,
        // Handled in `run` before the config is loaded.
        Command::Config(_) => Ok(()),
    }
}

fn menu(out: &Output) -> AppResult<()> {
    let tabs: Vec<_> = Screen::ALL
        .iter()
        .map(|s| json!({ "id": s.id(), "label": s.label(), "command": s.command() }))
        .collect();
    out.emit(&tabs, || {
        let mut table = Table::new(["#", "Screen", "Id", "Command"]);
        for (i, s) in Screen::ALL.iter().enumerate() {
            table.row([
                (i + 1).to_string(),
                s.label().to_string(),
                s.id().to_string(),
                format!("tiffin-admin {}", s.command()),
            ]);
        }
        print!("{}", table.render());
    })
}

/// Shows a screen's default view.
async fn open(ctx: &Ctx, screen: Screen) -> AppResult<()> {
    debug!(screen = screen.id(), "Opening screen");
    match screen {
        Screen::Dashboard => commands::dashboard::run(ctx, DashboardCommand::Show).await,
        Screen::Items => {
            let list = ItemsCommand::List {
                search: String::new(),
                out_of_stock: false,
            };
            commands::items::run(ctx, list).await
        }
        Screen::Banners => commands::banners::run(ctx, BannersCommand::List).await,
        Screen::Coupons => commands::coupons::run(ctx, CouponsCommand::List).await,
        Screen::Notifications => commands::notifications::run(ctx, NotificationsCommand::History).await,
        Screen::Points => commands::points::run(ctx, PointsCommand::List).await,
        Screen::MerchantSettlements => commands::settlements::run(ctx, SettlementsCommand::List).await,
        Screen::MerchantExtraSettlements => commands::extra::run(ctx, ExtraSettlementsCommand::List).await,
        Screen::MerchantQrcodes => commands::qrcodes::run(ctx, QrCommand::List).await,
        Screen::Refund => ctx
            .out
            .message(&format!("Usage: tiffin-admin {}", screen.command())),
    }
}

/// Prints a failed command's error to stderr.
pub fn report_error(err: &AppError, json: bool) {
    if json {
        eprintln!(
            "{}",
            json!({ "error": { "code": err.code(), "message": err.to_string() } })
        );
    } else {
        eprintln!("error[{}]: {}", err.code().as_str(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SESSION_FILE_NAME;

    fn ctx() -> Ctx {
        let config = AdminConfig::default();
        Ctx {
            client: ApiClient::new(config.api.clone()).unwrap(),
            config,
            out: Output::new(true, true),
        }
    }

    #[test]
    fn test_session_gate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SESSION_FILE_NAME);
        let ctx = ctx();

        assert!(matches!(require_session(&ctx, &path), Err(AppError::NotAuthenticated)));

        Session {
            authenticated: true,
            ..Session::default()
        }
        .save(&path)
        .unwrap();
        require_session(&ctx, &path).unwrap();

        std::fs::write(&path, "authenticated = false\n").unwrap();
        assert!(matches!(require_session(&ctx, &path), Err(AppError::NotAuthenticated)));
    }
}
