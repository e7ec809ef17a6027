/// Display preference storage.
///
/// The theme and table sort preference survive across sessions. The store
/// is created once in `main` and handed to whoever needs it, so there are
/// no ambient storage reads scattered through the codebase; the file is
/// read once at startup and written through on every update.
use crate::domain::SortColumn;
use crate::errors::ApiResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The persisted preference record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayPreferences {
    pub theme: Theme,
    pub sort_column: SortColumn,
    pub sort_descending: bool,
}

/// File-backed preference store
pub struct PrefsStore {
    path: PathBuf,
    current: RwLock<DisplayPreferences>,
}

impl PrefsStore {
    /// Open the store, falling back to defaults when the file does not
    /// exist yet or cannot be parsed (a corrupt preference file should
    /// never keep the service from starting).
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let current = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                info!("preference file unreadable ({}), using defaults", e);
                DisplayPreferences::default()
            }),
            Err(_) => DisplayPreferences::default(),
        };
        Self {
            path,
            current: RwLock::new(current),
        }
    }

    pub fn get(&self) -> DisplayPreferences {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the preferences and write them through to disk
    pub fn set(&self, prefs: DisplayPreferences) -> ApiResult<DisplayPreferences> {
        let raw = serde_json::to_string_pretty(&prefs)?;
        std::fs::write(&self.path, raw)?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = prefs;
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("launch_dashboard_prefs_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_open_missing_file_yields_defaults() {
        let store = PrefsStore::open(temp_path("missing"));
        let prefs = store.get();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.sort_column, SortColumn::LaunchDateUnix);
        assert!(!prefs.sort_descending);
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let path = temp_path("roundtrip");
        let store = PrefsStore::open(&path);
        let updated = DisplayPreferences {
            theme: Theme::Dark,
            sort_column: SortColumn::Kg,
            sort_descending: true,
        };
        store.set(updated).unwrap();

        let reopened = PrefsStore::open(&path);
        assert_eq!(reopened.get(), updated);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        let store = PrefsStore::open(&path);
        assert_eq!(store.get(), DisplayPreferences::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }
}
