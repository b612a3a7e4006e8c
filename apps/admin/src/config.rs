//! # Console Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TIFFIN_API_BASE=https://staging.sixty6foods.in                     │
//! │     TIFFIN_ALLOWED_PHONES=8950291327,9719697197                        │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/tiffin-admin/admin.toml (Linux)                          │
//! │     ~/Library/Application Support/in.tiffinwala.admin/admin.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! api_base = "https://api.sixty6foods.in"
//! merchant_base = "https://merchant.tiffinwala.services"
//! timeout_secs = 30
//!
//! [auth]
//! allowed_phones = ["8950291327", "9719697197"]
//!
//! [qr]
//! background = "/srv/assets/tiffin-qr-bg.png"
//! label_font = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"
//! output_dir = "qr-posters"
//!
//! [output]
//! json = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tiffin_api::ApiConfig;
use tiffin_core::deeplink::DeepLinkConfig;
use tiffin_core::DEFAULT_ALLOWED_PHONES;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

pub const CONFIG_FILE_NAME: &str = "admin.toml";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Phones allowed to request a login OTP.
    #[serde(default = "default_allowed_phones")]
    pub allowed_phones: Vec<String>,
}

fn default_allowed_phones() -> Vec<String> {
    DEFAULT_ALLOWED_PHONES.iter().map(|p| p.to_string()).collect()
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            allowed_phones: default_allowed_phones(),
        }
    }
}

/// Merchant QR poster settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrSettings {
    /// Poster background, scaled to cover the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,

    /// TrueType/OpenType font for the merchant id under the code. Without
    /// one the poster carries no label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_font: Option<PathBuf>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub deep_link: DeepLinkConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for QrSettings {
    fn default() -> Self {
        QrSettings {
            background: None,
            label_font: None,
            output_dir: default_output_dir(),
            deep_link: DeepLinkConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Print raw JSON instead of tables.
    #[serde(default)]
    pub json: bool,
}

// =============================================================================
// AdminConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub qr: QrSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl AdminConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (admin.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading admin config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file, without env overrides or validation.
    pub fn read_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// What `config init` writes to `path`: the file's own settings when it
    /// parses, defaults when it is missing or broken, then `TIFFIN_*` env.
    pub fn for_init(path: &Path) -> Self {
        Self::for_init_with(path, |key| std::env::var(key).ok())
    }

    fn for_init_with<F>(path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            Self::read_file(path).unwrap_or_else(|e| {
                warn!(?path, error = %e, "Existing config is unreadable, starting from defaults");
                Self::default()
            })
        } else {
            Self::default()
        };
        config.apply_env_overrides(lookup);
        config
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> AppResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| AppError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Admin config saved");
        Ok(path)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.api
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.auth.allowed_phones.iter().all(|p| p.trim().is_empty()) {
            return Err(AppError::Config(
                "auth.allowed_phones must list at least one phone".into(),
            ));
        }

        for (name, path) in [("qr.background", &self.qr.background), ("qr.label_font", &self.qr.label_font)] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(AppError::Config(format!(
                        "{} does not exist: {}",
                        name,
                        path.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Applies `TIFFIN_*` overrides. `lookup` is `std::env::var` in
    /// production and a map in tests.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("TIFFIN_API_BASE") {
            debug!(url = %base, "Overriding API base from environment");
            self.api.api_base = base;
        }

        if let Some(base) = lookup("TIFFIN_MERCHANT_BASE") {
            debug!(url = %base, "Overriding merchant base from environment");
            self.api.merchant_base = base;
        }

        if let Some(timeout) = lookup("TIFFIN_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric TIFFIN_TIMEOUT_SECS"),
            }
        }

        if let Some(phones) = lookup("TIFFIN_ALLOWED_PHONES") {
            self.auth.allowed_phones = phones
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(path) = lookup("TIFFIN_QR_BACKGROUND") {
            self.qr.background = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("TIFFIN_QR_FONT") {
            self.qr.label_font = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("TIFFIN_QR_OUTPUT_DIR") {
            self.qr.output_dir = PathBuf::from(dir);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

pub(crate) fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("in", "tiffinwala", "tiffin-admin")
}

/// Resolves the file the CLI should use: `--config`, else the default.
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(AdminConfig::default_config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.allowed_phones, vec!["8950291327", "9719697197"]);
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.output.json);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = AdminConfig::default();
        config.api.api_base = "http://127.0.0.1:8080".into();
        config.output.json = true;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("[auth]"));

        let parsed: AdminConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: AdminConfig = toml::from_str("[output]\njson = true\n").unwrap();
        assert!(parsed.output.json);
        assert_eq!(parsed.api.api_base, "https://api.sixty6foods.in");
        assert_eq!(parsed.qr.deep_link.android_package, "com.tiffinwala.app");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TIFFIN_API_BASE", "http://localhost:4000"),
            ("TIFFIN_TIMEOUT_SECS", "not-a-number"),
            ("TIFFIN_ALLOWED_PHONES", " 9000000001 , ,9000000002"),
        ]);

        let mut config = AdminConfig::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.api_base, "http://localhost:4000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.auth.allowed_phones, vec!["9000000001", "9000000002"]);
    }

    #[test]
    fn test_validation() {
        let mut config = AdminConfig::default();
        config.auth.allowed_phones = vec![" ".into()];
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AdminConfig::default();
        config.qr.label_font = Some(PathBuf::from("/definitely/not/here.ttf"));
        assert!(config.validate().is_err());

        let mut config = AdminConfig::default();
        config.api.api_base = "nope".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_init_replaces_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[api\napi_base = ").unwrap();
        assert!(AdminConfig::load(Some(path.clone())).is_err());

        let config = AdminConfig::for_init_with(&path, |_| None);
        assert_eq!(config, AdminConfig::default());
    }

    #[test]
    fn test_init_keeps_parseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[output]\njson = true\n").unwrap();

        let config = AdminConfig::for_init_with(&path, |k| {
            (k == "TIFFIN_API_BASE").then(|| "http://localhost:4000".to_string())
        });
        assert!(config.output.json);
        assert_eq!(config.api.api_base, "http://localhost:4000");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AdminConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.auth, AuthSettings::default());
    }
}
