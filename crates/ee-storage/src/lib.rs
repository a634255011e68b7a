//! On-disk persistence: user settings and navigation history.
//!
//! Both stores live under `~/.elementeye/` as pretty-printed JSON and fall
//! back to defaults when their file is missing or unreadable.

mod history;
mod settings;

pub use history::HistoryEntry;
pub use history::HistoryStore;
pub use settings::Settings;
pub use settings::SettingsStore;
pub use settings::Theme;

use std::path::PathBuf;

use ee_core::EyeError;
use ee_core::EyeResult;

/// Directory holding all ElementEye state, created on first use.
pub fn config_dir() -> EyeResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| EyeError::new("storage.home_dir", "home directory not found"))?;
    let dir = home.join(".elementeye");
    std::fs::create_dir_all(&dir).map_err(|error| {
        EyeError::new(
            "storage.create_dir",
            format!("cannot create {}: {error}", dir.display()),
        )
    })?;
    Ok(dir)
}
