use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced at the operation boundary.
///
/// Per-item problems inside a batch (a single rename failing, a target that
/// already exists) are not errors; they are reported as
/// [`ItemOutcome`](crate::ItemOutcome) values and the batch carries on.
#[derive(Debug, Error)]
pub enum Error {
    /// The target folder could not be listed. Fatal for the whole operation.
    #[error("Cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other filesystem failure at operation level
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more regular expressions failed to compile
    #[error("Invalid regex patterns: {}", .0.join(", "))]
    InvalidPatterns(Vec<String>),

    /// The undo journal exists but cannot be decoded or encoded
    #[error("Undo journal {} is unreadable: {source}", path.display())]
    Journal {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings file exists but is not valid TOML for [`Settings`](crate::Settings)
    #[error("Invalid settings file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
