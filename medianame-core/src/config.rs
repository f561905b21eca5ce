use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Remembers the folder the last command worked on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastFolderConfig {
    #[serde(default)]
    pub last_folder: String,
}

impl LastFolderConfig {
    pub const FILE_NAME: &'static str = "config.json";

    pub fn path_in(state_dir: &Path) -> PathBuf {
        state_dir.join(Self::FILE_NAME)
    }

    /// Load the record, falling back to an empty one if the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let parsed = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(config) => config,
            Err(reason) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), %reason, "ignoring unreadable last-folder config");
                }
                Self::default()
            },
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, content).map_err(|e| Error::io("write", path, e))
    }

    /// The remembered folder, if one was saved
    pub fn folder(&self) -> Option<PathBuf> {
        if self.last_folder.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.last_folder))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Take a backup before every rename or organize
    #[serde(default)]
    pub backup_first: bool,

    /// Filter directive for the log file when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            use_color: None,
            backup_first: false,
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Settings {
    pub const FILE_NAME: &'static str = "config.toml";

    /// Load `config.toml` from the state directory if it exists
    pub fn load_or_default(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join(Self::FILE_NAME);
        if path.exists() {
            return Self::load_from_path(&path);
        }
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, content).map_err(|e| Error::io("write", path, e))
    }
}
