use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::FileStore;

pub const APP_DIR: &str = "dayslate";
pub const CONFIG_FILE: &str = "config.json";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join(APP_DIR)
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Where `tasks`, `categories` and `userName` are stored.
    pub data_directory: PathBuf,
    pub notification_window_minutes: u32,
    pub refresh_interval_secs: u64,
    pub debug_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            notification_window_minutes: 60,
            refresh_interval_secs: 60,
            debug_logging: false,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the user config directory, falling back to defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn notification_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.notification_window_minutes))
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_directory)
    }
}
