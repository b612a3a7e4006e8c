//! Locally kept history of sent push notifications.
//!
//! The notification endpoint only fires; it has no list call. The console
//! records what it sent so the `notifications history` screen has something
//! to show.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tiffin_core::SentNotification;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::project_dirs;
use crate::error::{AppError, AppResult};

pub const HISTORY_FILE_NAME: &str = "notifications.json";

/// Sent notifications, newest first.
#[derive(Debug, Clone)]
pub struct NotificationHistory {
    path: PathBuf,
    entries: Vec<SentNotification>,
}

impl NotificationHistory {
    pub fn load(path: PathBuf) -> AppResult<Self> {
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            debug!(?path, "No notification history yet");
            Vec::new()
        };
        Ok(NotificationHistory { path, entries })
    }

    /// Like [`load`](Self::load), but an unreadable file is logged and
    /// treated as empty. The next [`record`](Self::record) replaces it.
    pub fn load_or_empty(path: PathBuf) -> Self {
        match Self::load(path.clone()) {
            Ok(history) => history,
            Err(e) => {
                warn!(?path, error = %e, "Notification history unreadable, starting empty");
                NotificationHistory {
                    path,
                    entries: Vec::new(),
                }
            }
        }
    }

    /// History file location: `TIFFIN_HISTORY_PATH`, else the platform data dir.
    pub fn default_path() -> AppResult<PathBuf> {
        if let Ok(path) = std::env::var("TIFFIN_HISTORY_PATH") {
            return Ok(PathBuf::from(path));
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(HISTORY_FILE_NAME))
            .ok_or_else(|| AppError::Session("Could not determine app data directory".into()))
    }

    pub fn entries(&self) -> &[SentNotification] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepends a sent notification and writes the file.
    pub fn record(&mut self, title: &str, message: &str, sent_at: DateTime<Utc>) -> AppResult<&SentNotification> {
        let entry = SentNotification {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            message: message.to_string(),
            sent_at,
        };
        self.entries.insert(0, entry);
        self.save()?;
        Ok(&self.entries[0])
    }

    fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_keeps_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join(HISTORY_FILE_NAME);

        let mut history = NotificationHistory::load(path.clone()).unwrap();
        assert!(history.entries().is_empty());

        let first = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        history.record("Lunch is live", "Order now", first).unwrap();
        history.record("Dinner is live", "Thali at 20% off", second).unwrap();

        let reloaded = NotificationHistory::load(path).unwrap();
        let titles: Vec<_> = reloaded.entries().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Dinner is live", "Lunch is live"]);
        assert_ne!(reloaded.entries()[0].id, reloaded.entries()[1].id);
        assert_eq!(reloaded.entries()[1].sent_at, first);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(NotificationHistory::load(path).is_err());
    }

    #[test]
    fn test_corrupt_file_does_not_block_recording() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        let mut history = NotificationHistory::load_or_empty(path.clone());
        assert!(history.entries().is_empty());
        history
            .record("Lunch is live", "Order now", Utc::now())
            .unwrap();

        let reloaded = NotificationHistory::load(path).unwrap();
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.entries()[0].title, "Lunch is live");
    }
}
