//! OTP login endpoints: `{api_base}/auth`.

use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, Envelope};
use crate::error::ApiResult;

#[derive(Serialize)]
struct SendOtpBody<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpBody<'a> {
    phone: &'a str,
    otp: &'a str,
}

impl ApiClient {
    /// `POST /auth/send-otp`; true when the server reports the code as sent.
    pub async fn send_otp(&self, phone: &str) -> ApiResult<bool> {
        let env: Envelope<Value> = self
            .post(&self.api_url("/auth/send-otp"), &SendOtpBody { phone })
            .await?;
        Ok(env.status)
    }

    /// `POST /auth/verify-otp`; true when the code matched.
    pub async fn verify_otp(&self, phone: &str, otp: &str) -> ApiResult<bool> {
        let env: Envelope<Value> = self
            .post(&self.api_url("/auth/verify-otp"), &VerifyOtpBody { phone, otp })
            .await?;
        Ok(env.status)
    }
}
