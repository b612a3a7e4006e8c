//! # tiffin-admin entry point
//!
//! Parses the command line, sets up logging and hands over to
//! [`tiffin_admin::run`]. The exit status comes from the error, if any.

use std::process::ExitCode;

use clap::Parser;
use tiffin_admin::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tiffin_admin::init_tracing(cli.verbose);

    let json = cli.json;
    match tiffin_admin::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tiffin_admin::report_error(&err, json);
            ExitCode::from(err.exit_code())
        }
    }
}
