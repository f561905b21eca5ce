use crate::apply::ItemOutcome;
use crate::error::{Error, Result};
use crate::inventory::list_files;
use crate::journal::{UndoBatch, UndoLog};
use crate::reporter::Reporter;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct OrganizedFile {
    pub name: String,
    /// `YYYY-MM-DD` folder the file belongs in, when its date could be read
    pub date_folder: Option<String>,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizeReport {
    pub items: Vec<OrganizedFile>,
    #[serde(skip)]
    pub batch: UndoBatch,
    /// Set when the moves happened but the undo batch could not be stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_error: Option<String>,
}

impl OrganizeReport {
    pub fn moved(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_applied()).count()
    }

    pub fn skipped(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.outcome == ItemOutcome::SkippedCollision)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, ItemOutcome::Failed(_)))
            .count()
    }
}

/// Local creation date of `path` as `YYYY-MM-DD`.
///
/// Uses the modification time on filesystems that do not record a birth time.
pub fn date_folder_name(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| Error::io("read metadata of", path, e))?;
    let timestamp = metadata
        .created()
        .or_else(|_| metadata.modified())
        .map_err(|e| Error::io("read timestamps of", path, e))?;
    let date: DateTime<Local> = timestamp.into();
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Move each supported file of `folder` into a subfolder named after its
/// creation date, and store the moves as the undo batch.
pub fn organize_by_date(
    folder: &Path,
    journal: &UndoLog,
    reporter: &mut dyn Reporter,
) -> Result<OrganizeReport> {
    let files = list_files(folder)?;
    let mut report = OrganizeReport::default();

    for (i, file) in files.iter().enumerate() {
        let source = file.path_in(folder);

        let (date_folder, outcome) = match date_folder_name(&source) {
            Ok(date) => {
                let outcome = move_into(folder, &date, &file.name, &mut report.batch, reporter);
                (Some(date), outcome)
            },
            Err(e) => {
                reporter.error(&format!("Error organizing {}: {}", file.name, e));
                tracing::error!(file = %file.name, error = %e, "cannot read file date");
                (None, ItemOutcome::Failed(e.to_string()))
            },
        };

        report.items.push(OrganizedFile {
            name: file.name.clone(),
            date_folder,
            outcome,
        });
        reporter.progress(crate::percent(i + 1, files.len()));
    }

    report.journal_error = crate::journal::store_or_report(journal, &report.batch, reporter);

    reporter.info("Files organized by creation date.");
    tracing::info!(folder = %folder.display(), moved = report.moved(), "files organized by creation date");
    Ok(report)
}

fn move_into(
    folder: &Path,
    date: &str,
    name: &str,
    batch: &mut UndoBatch,
    reporter: &mut dyn Reporter,
) -> ItemOutcome {
    let source = folder.join(name);
    let dest_folder = folder.join(date);
    let target = dest_folder.join(name);

    if let Err(e) = fs::create_dir_all(&dest_folder) {
        reporter.error(&format!("Error creating folder {}: {}", date, e));
        tracing::error!(folder = %dest_folder.display(), error = %e, "cannot create date folder");
        return ItemOutcome::Failed(e.to_string());
    }

    if crate::journal::path_taken(&target) {
        reporter.warn(&format!(
            "[SKIP] {} -> {} (Target exists, skipping to prevent overwrite)",
            name, date
        ));
        tracing::warn!(file = %name, target = %target.display(), "skipping move (target exists)");
        return ItemOutcome::SkippedCollision;
    }

    match fs::rename(&source, &target) {
        Ok(()) => {
            batch.push(target, source);
            reporter.info(&format!("Moved: {} -> {}", name, date));
            tracing::info!(file = %name, folder = %date, "moved");
            ItemOutcome::Moved
        },
        Err(e) => {
            reporter.error(&format!("Error moving {} -> {}: {}", name, date, e));
            tracing::error!(file = %name, error = %e, "move failed");
            ItemOutcome::Failed(e.to_string())
        },
    }
}
