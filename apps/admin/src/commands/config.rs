//! `config` subcommands: write, show and locate `admin.toml`.
//!
//! These run before the config is loaded, so a broken file can still be
//! located and rewritten.

use std::path::{Path, PathBuf};

use crate::cli::ConfigCommand;
use crate::config::{resolve_path, AdminConfig};
use crate::error::{AppError, AppResult};
use crate::output::Output;

pub fn run(config_path: Option<&Path>, out: &Output, cmd: ConfigCommand) -> AppResult<()> {
    match cmd {
        ConfigCommand::Init { force } => {
            let written = init(&target(config_path)?, force)?;
            out.message(&format!("Wrote {}", written.display()))
        }
        ConfigCommand::Show => {
            let config = AdminConfig::load(config_path.map(Path::to_path_buf))?;
            if out.json {
                return out.json(&config);
            }
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommand::Path => {
            let path = target(config_path)?;
            out.emit(&serde_json::json!({ "path": path }), || {
                println!("{}", path.display())
            })
        }
    }
}

/// Writes `path`, refusing to replace an existing file unless `force`.
pub fn init(path: &Path, force: bool) -> AppResult<PathBuf> {
    if path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    AdminConfig::for_init(path).save(Some(path.to_path_buf()))
}

fn target(config_path: Option<&Path>) -> AppResult<PathBuf> {
    resolve_path(config_path).ok_or_else(|| AppError::Config("No config path available".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    #[test]
    fn test_init_force_repairs_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "api = [[[").unwrap();

        let err = init(&path, false).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        init(&path, true).unwrap();
        let repaired = AdminConfig::read_file(&path).unwrap();
        assert_eq!(repaired.qr, AdminConfig::default().qr);
        assert_eq!(repaired.output, AdminConfig::default().output);
    }

    #[test]
    fn test_path_and_init_skip_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let out = Output::new(true, true);

        run(Some(&path), &out, ConfigCommand::Path).unwrap();
        run(Some(&path), &out, ConfigCommand::Init { force: false }).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_show_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "api = [[[").unwrap();
        let out = Output::new(true, true);
        assert!(run(Some(&path), &out, ConfigCommand::Show).is_err());
    }
}
