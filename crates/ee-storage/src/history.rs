use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Utc;
use ee_core::EyeError;
use ee_core::EyeResult;
use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

/// One visited page, newest entries at the end of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only navigation history with a size cap.
///
/// The whole list is rewritten on every change; entries past the cap are
/// dropped from the oldest end.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl HistoryStore {
    pub const DEFAULT_MAX: usize = 100;

    /// Opens the store under the standard config directory.
    pub fn open(max_entries: usize) -> EyeResult<Self> {
        Ok(Self::open_at(
            crate::config_dir()?.join("history.json"),
            max_entries,
        ))
    }

    /// Opens the store at an explicit path. A missing or corrupt file
    /// yields an empty history.
    pub fn open_at(path: PathBuf, max_entries: usize) -> Self {
        let entries = load_entries(&path);
        let mut store = Self {
            path,
            entries,
            max_entries,
        };
        store.trim();
        store
    }

    /// Oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Records a visit now and persists the updated list.
    pub fn record(&mut self, url: &str) -> EyeResult<()> {
        self.entries.push(HistoryEntry {
            url: url.to_owned(),
            timestamp: Utc::now(),
        });
        self.trim();
        self.save()
    }

    /// Applies a new cap, trimming and persisting if entries were dropped.
    pub fn set_max_entries(&mut self, max_entries: usize) -> EyeResult<()> {
        self.max_entries = max_entries;
        if self.trim() {
            self.save()?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> EyeResult<()> {
        self.entries.clear();
        self.save()
    }

    fn trim(&mut self) -> bool {
        if self.entries.len() <= self.max_entries {
            return false;
        }
        let excess = self.entries.len() - self.max_entries;
        self.entries.drain(..excess);
        true
    }

    fn save(&self) -> EyeResult<()> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|error| {
            EyeError::new("storage.encode", format!("history encode failed: {error}"))
        })?;
        std::fs::write(&self.path, json).map_err(|error| {
            EyeError::new(
                "storage.write",
                format!("cannot write {}: {error}", self.path.display()),
            )
        })
    }
}

fn load_entries(path: &Path) -> Vec<HistoryEntry> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&data) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(path = %path.display(), %error, "history file unreadable, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HistoryStore;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(error) => panic!("{error}"),
        };
        dir.keep().join(name)
    }

    #[test]
    fn records_visits_in_order() {
        let path = temp_path("history.json");
        let mut store = HistoryStore::open_at(path.clone(), 100);
        for url in ["https://a.example/", "https://b.example/"] {
            if let Err(error) = store.record(url) {
                panic!("{error}");
            }
        }

        let reloaded = HistoryStore::open_at(path, 100);
        let urls: Vec<&str> = reloaded
            .entries()
            .iter()
            .map(|entry| entry.url.as_str())
            .collect();
        assert_eq!(urls, vec!["https://a.example/", "https://b.example/"]);
    }

    #[test]
    fn cap_drops_oldest_entries() {
        let mut store = HistoryStore::open_at(temp_path("history.json"), 3);
        for i in 0..5 {
            if let Err(error) = store.record(&format!("https://example.com/{i}")) {
                panic!("{error}");
            }
        }
        let urls: Vec<&str> = store
            .entries()
            .iter()
            .map(|entry| entry.url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/2",
                "https://example.com/3",
                "https://example.com/4",
            ]
        );
    }

    #[test]
    fn lowering_the_cap_trims_immediately() {
        let path = temp_path("history.json");
        let mut store = HistoryStore::open_at(path.clone(), 100);
        for i in 0..10 {
            if let Err(error) = store.record(&format!("https://example.com/{i}")) {
                panic!("{error}");
            }
        }
        if let Err(error) = store.set_max_entries(4) {
            panic!("{error}");
        }
        assert_eq!(store.entries().len(), 4);
        assert_eq!(store.entries()[0].url, "https://example.com/6");

        // The trim is persisted, not just in memory.
        let reloaded = HistoryStore::open_at(path, 100);
        assert_eq!(reloaded.entries().len(), 4);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let path = temp_path("history.json");
        if let Err(error) = std::fs::write(&path, "[{broken") {
            panic!("{error}");
        }
        let store = HistoryStore::open_at(path, 100);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let path = temp_path("history.json");
        let mut store = HistoryStore::open_at(path.clone(), 100);
        if let Err(error) = store.record("https://example.com/") {
            panic!("{error}");
        }
        if let Err(error) = store.clear() {
            panic!("{error}");
        }
        assert!(store.entries().is_empty());
        assert!(HistoryStore::open_at(path, 100).entries().is_empty());
    }
}
