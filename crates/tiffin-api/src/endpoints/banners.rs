//! Banner endpoints: `{api_base}/banner`.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tiffin_core::validation::validate_banner_file;
use tiffin_core::Banner;
use tracing::info;

use crate::client::{segment, ApiClient, Envelope};
use crate::error::{ApiError, ApiResult};

impl ApiClient {
    /// `GET /banner/`
    pub async fn list_banners(&self) -> ApiResult<Vec<Banner>> {
        let env: Envelope<Vec<Banner>> = self.get(&self.api_url("/banner/")).await?;
        env.into_data()
    }

    /// `POST /banner/upload` as multipart: `file`, plus `redirect` when given.
    pub async fn upload_banner(&self, file: &Path, redirect: Option<&str>) -> ApiResult<Option<String>> {
        validate_banner_file(file)?;

        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::InvalidInput(format!("bad file name: {}", file.display())))?
            .to_string();
        let bytes = tokio::fs::read(file).await?;
        let size = bytes.len();

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(image_mime(file))?;
        let mut form = Form::new().part("file", part);
        if let Some(redirect) = redirect.map(str::trim).filter(|r| !r.is_empty()) {
            form = form.text("redirect", redirect.to_string());
        }

        let env: Envelope<Value> = self
            .post_multipart(&self.api_url("/banner/upload"), form)
            .await?;
        let message = env.into_ack()?;
        info!(file = %file_name, size, "Banner uploaded");
        Ok(message)
    }

    /// `DELETE /banner/{id}`
    pub async fn delete_banner(&self, id: &str) -> ApiResult<Option<String>> {
        let url = self.api_url(&format!("/banner/{}", segment(id)));
        let env: Envelope<Value> = self.delete(&url).await?;
        env.into_ack()
    }
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(image_mime(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(image_mime(Path::new("a")), "application/octet-stream");
    }
}
