//! OTP login screen.

use std::path::PathBuf;

use serde_json::json;
use tiffin_core::ValidationError;
use tracing::debug;

use super::Ctx;
use crate::cli::AuthCommand;
use crate::error::{AppError, AppResult};
use crate::output::prompt_line;
use crate::state::AuthContext;

pub async fn run(ctx: &Ctx, cmd: AuthCommand, session_path: PathBuf) -> AppResult<()> {
    let mut auth = AuthContext::load(&ctx.client, &ctx.config.auth.allowed_phones, session_path)?;

    match cmd {
        AuthCommand::SendOtp { phone } => {
            send(&auth, &phone).await?;
            ctx.out.message("OTP sent.")
        }
        AuthCommand::Verify { phone, otp } => {
            verify(&mut auth, &phone, &otp).await?;
            ctx.out.message("Signed in.")
        }
        AuthCommand::Login { phone } => {
            send(&auth, &phone).await?;
            let otp = prompt_line("Enter OTP: ")?;
            verify(&mut auth, &phone, &otp).await?;
            ctx.out.message("Signed in.")
        }
        AuthCommand::Logout => {
            auth.logout()?;
            ctx.out.message("Signed out.")
        }
        AuthCommand::Status => {
            let session = auth.session();
            debug!(path = ?auth.path(), "Session status");
            ctx.out.emit(
                &json!({
                    "authenticated": session.authenticated,
                    "phone": session.phone,
                    "signedInAt": session.signed_in_at,
                }),
                || match (&session.phone, session.signed_in_at) {
                    (Some(phone), Some(at)) if session.authenticated => {
                        println!("Signed in as {} since {}", phone, at.format("%Y-%m-%d %H:%M UTC"))
                    }
                    _ if session.authenticated => println!("Signed in"),
                    _ => println!("Not signed in"),
                },
            )
        }
    }
}

async fn send(auth: &AuthContext<'_, tiffin_api::ApiClient>, phone: &str) -> AppResult<()> {
    match auth.send_otp_code(phone).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AppError::Auth("Failed to send OTP.".into())),
        Err(AppError::Validation(ValidationError::NotAllowed { .. })) => {
            Err(AppError::Auth("Invalid phone number.".into()))
        }
        Err(e) => Err(e),
    }
}

async fn verify(auth: &mut AuthContext<'_, tiffin_api::ApiClient>, phone: &str, otp: &str) -> AppResult<()> {
    if auth.verify_otp_code(phone, otp).await? {
        Ok(())
    } else {
        Err(AppError::Auth("Invalid OTP.".into()))
    }
}
