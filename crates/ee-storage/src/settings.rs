use std::path::Path;
use std::path::PathBuf;

use ee_core::EyeError;
use ee_core::EyeResult;
use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

/// Interface theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User preferences. Unknown fields in the file are ignored and missing
/// fields take their defaults, so older or hand-edited files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub language: String,
    pub timeout_secs: u64,
    pub max_history: usize,
    pub font_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: "zh-CN".to_owned(),
            timeout_secs: 10,
            max_history: 100,
            font_size: 14.0,
        }
    }
}

impl Settings {
    pub const TIMEOUT_RANGE: (u64, u64) = (1, 60);
    pub const HISTORY_RANGE: (usize, usize) = (10, 1000);
    pub const FONT_RANGE: (f32, f32) = (8.0, 24.0);

    /// Clamps every numeric field into its permitted range.
    pub fn clamped(mut self) -> Self {
        self.timeout_secs = self
            .timeout_secs
            .clamp(Self::TIMEOUT_RANGE.0, Self::TIMEOUT_RANGE.1);
        self.max_history = self
            .max_history
            .clamp(Self::HISTORY_RANGE.0, Self::HISTORY_RANGE.1);
        self.font_size = self.font_size.clamp(Self::FONT_RANGE.0, Self::FONT_RANGE.1);
        self
    }
}

/// Loads and saves [`Settings`] at a fixed path.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    pub settings: Settings,
}

impl SettingsStore {
    /// Opens the store under the standard config directory.
    pub fn open() -> EyeResult<Self> {
        Ok(Self::open_at(crate::config_dir()?.join("settings.json")))
    }

    /// Opens the store at an explicit path. A missing or corrupt file
    /// yields the defaults.
    pub fn open_at(path: PathBuf) -> Self {
        let settings = load_settings(&path);
        Self { path, settings }
    }

    pub fn save(&self) -> EyeResult<()> {
        let json = serde_json::to_string_pretty(&self.settings).map_err(|error| {
            EyeError::new("storage.encode", format!("settings encode failed: {error}"))
        })?;
        std::fs::write(&self.path, json).map_err(|error| {
            EyeError::new(
                "storage.write",
                format!("cannot write {}: {error}", self.path.display()),
            )
        })
    }
}

fn load_settings(path: &Path) -> Settings {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return Settings::default(),
    };
    match serde_json::from_str::<Settings>(&data) {
        Ok(settings) => settings.clamped(),
        Err(error) => {
            warn!(path = %path.display(), %error, "settings file unreadable, using defaults");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use super::SettingsStore;
    use super::Theme;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(error) => panic!("{error}"),
        };
        // Keep the directory alive for the rest of the process.
        dir.keep().join(name)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let store = SettingsStore::open_at(temp_path("settings.json"));
        assert_eq!(store.settings, Settings::default());
        assert_eq!(store.settings.theme, Theme::Light);
        assert_eq!(store.settings.language, "zh-CN");
        assert_eq!(store.settings.timeout_secs, 10);
        assert_eq!(store.settings.max_history, 100);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let path = temp_path("settings.json");
        if let Err(error) = std::fs::write(&path, "{not json") {
            panic!("{error}");
        }
        let store = SettingsStore::open_at(path);
        assert_eq!(store.settings, Settings::default());
    }

    #[test]
    fn save_and_reload_round_trips() {
        let path = temp_path("settings.json");
        let mut store = SettingsStore::open_at(path.clone());
        store.settings.theme = Theme::Dark;
        store.settings.language = "en".to_owned();
        store.settings.timeout_secs = 30;
        if let Err(error) = store.save() {
            panic!("{error}");
        }

        let reloaded = SettingsStore::open_at(path);
        assert_eq!(reloaded.settings, store.settings);
    }

    #[test]
    fn loaded_values_are_clamped_into_range() {
        let path = temp_path("settings.json");
        let raw = r#"{"theme":"dark","timeout_secs":500,"max_history":2,"font_size":100.0}"#;
        if let Err(error) = std::fs::write(&path, raw) {
            panic!("{error}");
        }
        let store = SettingsStore::open_at(path);
        assert_eq!(store.settings.timeout_secs, 60);
        assert_eq!(store.settings.max_history, 10);
        assert_eq!(store.settings.font_size, 24.0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let path = temp_path("settings.json");
        let raw = r#"{"theme":"dark","export_format":"html"}"#;
        if let Err(error) = std::fs::write(&path, raw) {
            panic!("{error}");
        }
        let store = SettingsStore::open_at(path);
        assert_eq!(store.settings.theme, Theme::Dark);
        assert_eq!(store.settings.max_history, 100);
    }
}
