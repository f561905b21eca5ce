#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod backup;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod inventory;
pub mod journal;
pub mod organize;
pub mod output;
pub mod pattern;
pub mod plan;
pub mod preview;
pub mod reporter;

pub use apply::{apply_plan, AppliedEntry, ApplyReport, ItemOutcome};
pub use backup::backup_folder;
pub use config::{DefaultsConfig, LastFolderConfig, Settings};
pub use duplicates::{detect_duplicates, DuplicateReport};
pub use error::{Error, Result};
pub use inventory::{
    directory_names, has_supported_extension, list_files, list_titles, FileEntry,
    SUPPORTED_EXTENSIONS,
};
pub use journal::{UndoBatch, UndoLog, UndoRecord, UndoReport};
pub use organize::{date_folder_name, organize_by_date, OrganizeReport, OrganizedFile};
pub use output::{BackupResult, OutputFormat, OutputFormatter, StatusResult, TitlesResult};
pub use pattern::{validate_patterns, PatternSet};
pub use plan::{plan_renames, PlanSkip, RenameMode, RenamePlan, RenamePlanEntry, SkipReason};
pub use preview::render_plan_table;
pub use reporter::{ConsoleReporter, RecordingReporter, ReportLevel, Reporter, SilentReporter};

use std::path::{Path, PathBuf};

/// Directory (relative to the working directory) holding the undo journal,
/// the last-folder record, settings and the log file.
pub const STATE_DIR: &str = ".medianame";

/// Resolve the state directory for a working directory.
pub fn state_dir(working_dir: &Path) -> PathBuf {
    working_dir.join(STATE_DIR)
}

/// Percentage of `done` out of `total`, clamped to 100. An empty batch is complete.
pub(crate) fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let value = done as f64 / total as f64 * 100.0;
    value.min(100.0)
}
