//! Single-slot undo journal.
//!
//! Only the most recent batch is kept. Renames and date moves both end with
//! an explicit [`UndoLog::replace_batch`] call, and [`UndoLog::undo_last`]
//! consumes the stored batch exactly once.

use crate::error::{Error, Result};
use crate::reporter::Reporter;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

const JOURNAL_FILE_NAME: &str = "undo.json";

/// One applied mutation: the file now lives at `current_path` and came from
/// `original_path`. Stored on disk as a `[current, original]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(PathBuf, PathBuf)", into = "(PathBuf, PathBuf)")]
pub struct UndoRecord {
    pub current_path: PathBuf,
    pub original_path: PathBuf,
}

impl From<(PathBuf, PathBuf)> for UndoRecord {
    fn from((current_path, original_path): (PathBuf, PathBuf)) -> Self {
        Self {
            current_path,
            original_path,
        }
    }
}

impl From<UndoRecord> for (PathBuf, PathBuf) {
    fn from(record: UndoRecord) -> Self {
        (record.current_path, record.original_path)
    }
}

/// Records produced by one execution pass, in the order they were applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UndoBatch {
    pub records: Vec<UndoRecord>,
}

impl UndoBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, current_path: PathBuf, original_path: PathBuf) {
        self.records.push(UndoRecord {
            current_path,
            original_path,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What `undo_last` did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UndoReport {
    /// No batch was stored
    pub nothing_to_undo: bool,
    /// Files moved back to their original path
    pub restored: usize,
    /// Records whose current path no longer exists
    pub missing: usize,
    /// Records left alone because the original path is occupied
    pub blocked: usize,
    /// Records whose rename back failed
    pub failed: usize,
}

/// The persisted undo slot
#[derive(Debug, Clone)]
pub struct UndoLog {
    path: PathBuf,
}

impl UndoLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Journal at `<state_dir>/undo.json`
    pub fn in_state_dir(state_dir: &Path) -> Self {
        Self::new(state_dir.join(JOURNAL_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_pending(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the stored batch with `batch`.
    ///
    /// An empty batch leaves the stored one in place: it has nothing to
    /// revert, and writing it would make the previous batch unrecoverable.
    pub fn replace_batch(&self, batch: &UndoBatch) -> Result<()> {
        if batch.is_empty() {
            tracing::debug!(journal = %self.path.display(), "empty batch, journal left untouched");
            return Ok(());
        }

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| Error::io("create directory", &parent, e))?;

        // Write next to the journal then rename over it, so a crash never leaves half a batch
        let temp = tempfile::NamedTempFile::new_in(&parent)
            .map_err(|e| Error::io("create temporary journal in", &parent, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, batch).map_err(|e| Error::Journal {
                path: self.path.clone(),
                source: e,
            })?;
            writer
                .flush()
                .map_err(|e| Error::io("write", &self.path, e))?;
        }
        temp.persist(&self.path)
            .map_err(|e| Error::io("write", &self.path, e.error))?;

        tracing::info!(journal = %self.path.display(), records = batch.len(), "saved undo log");
        Ok(())
    }

    /// Read the stored batch, if any
    pub fn load(&self) -> Result<Option<UndoBatch>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io("open", &self.path, e)),
        };
        let batch = serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::Journal {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(batch))
    }

    /// Revert the stored batch, newest record first, then delete it.
    ///
    /// Records whose file has gone are skipped without complaint. A file is
    /// never moved onto an existing path.
    pub fn undo_last(&self, reporter: &mut dyn Reporter) -> Result<UndoReport> {
        let Some(batch) = self.load()? else {
            reporter.info("No actions to undo.");
            tracing::info!("no undo log found");
            return Ok(UndoReport {
                nothing_to_undo: true,
                ..UndoReport::default()
            });
        };

        let mut report = UndoReport::default();
        let total = batch.len();

        for (i, record) in batch.records.iter().rev().enumerate() {
            let current = &record.current_path;
            let original = &record.original_path;

            if !current.exists() {
                report.missing += 1;
                tracing::debug!(path = %current.display(), "undo target already gone");
            } else if path_taken(original) {
                report.blocked += 1;
                reporter.warn(&format!(
                    "[SKIP] {} -> {} (Original path is occupied, leaving file in place)",
                    display_name(current),
                    display_name(original)
                ));
                tracing::warn!(current = %current.display(), original = %original.display(), "undo blocked");
            } else {
                match fs::rename(current, original) {
                    Ok(()) => {
                        report.restored += 1;
                        reporter.info(&format!(
                            "Undid: {} -> {}",
                            display_name(current),
                            display_name(original)
                        ));
                        tracing::info!(current = %current.display(), original = %original.display(), "undid");
                    },
                    Err(e) => {
                        report.failed += 1;
                        reporter.error(&format!(
                            "Error undoing {} -> {}: {}",
                            display_name(current),
                            display_name(original),
                            e
                        ));
                        tracing::error!(current = %current.display(), error = %e, "undo failed");
                    },
                }
            }

            reporter.progress(crate::percent(i + 1, total));
        }

        remove_emptied_folders(&batch);
        self.clear()?;
        tracing::info!(journal = %self.path.display(), "cleared undo log");
        Ok(report)
    }

    /// Remove the stored batch
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io("remove", &self.path, e)),
        }
    }
}

/// Remove folders that only existed to receive moved files and are now empty
fn remove_emptied_folders(batch: &UndoBatch) {
    let mut folders: Vec<&Path> = batch
        .records
        .iter()
        .filter_map(|r| {
            let parent = r.current_path.parent()?;
            (Some(parent) != r.original_path.parent()).then_some(parent)
        })
        .collect();
    folders.sort();
    folders.dedup();

    for folder in folders {
        let is_empty = fs::read_dir(folder).is_ok_and(|mut entries| entries.next().is_none());
        if is_empty && fs::remove_dir(folder).is_ok() {
            tracing::debug!(folder = %folder.display(), "removed empty folder");
        }
    }
}

/// True if anything occupies `path`, including a dangling symlink
pub(crate) fn path_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Store a finished batch. On failure the problem is reported and returned
/// as text instead of discarding the report of what already changed.
pub(crate) fn store_or_report(
    journal: &UndoLog,
    batch: &UndoBatch,
    reporter: &mut dyn Reporter,
) -> Option<String> {
    match journal.replace_batch(batch) {
        Ok(()) => None,
        Err(e) => {
            reporter.error(&format!(
                "Could not save undo information: {}. {} completed changes cannot be undone.",
                e,
                batch.len()
            ));
            tracing::error!(journal = %journal.path().display(), error = %e, "failed to save undo log");
            Some(e.to_string())
        },
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
