use crate::apply::ApplyReport;
use crate::duplicates::DuplicateReport;
use crate::journal::UndoReport;
use crate::organize::OrganizeReport;
use crate::plan::RenamePlan;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a backup operation
#[derive(Debug, Serialize)]
pub struct BackupResult {
    pub backup_dir: PathBuf,
}

/// Result of the titles listing
#[derive(Debug, Serialize)]
pub struct TitlesResult {
    pub folder: PathBuf,
    pub titles: BTreeSet<String>,
}

/// Result of a status operation
#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub folder: Option<PathBuf>,
    pub undo_pending: bool,
    pub undo_records: usize,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;

    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
}

impl OutputFormatter for RenamePlan {
    fn format_json(&self) -> String {
        let collisions: Vec<_> = self
            .internal_collisions()
            .into_iter()
            .map(|(target, sources)| json!({ "target_name": target, "sources": sources }))
            .collect();

        serde_json::to_string(&json!({
            "success": true,
            "operation": "preview",
            "folder": self.folder,
            "summary": {
                "renames": self.entries.len(),
                "skipped": self.skipped.len(),
            },
            "entries": self.entries,
            "skipped": self.skipped,
            "internal_collisions": collisions,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Planned renames: {}", self.entries.len());
        if !self.skipped.is_empty() {
            let _ = writeln!(output, "Skipped: {}", self.skipped.len());
        }
        output
    }
}

impl OutputFormatter for ApplyReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failed() == 0 && self.journal_error.is_none(),
            "operation": "apply",
            "summary": {
                "renamed": self.renamed(),
                "skipped": self.skipped(),
                "failed": self.failed(),
            },
            "items": self.items,
            "journal_error": self.journal_error,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("✓ Renamed {} files", self.renamed());
        if self.skipped() > 0 {
            let _ = write!(output, ", skipped {}", self.skipped());
        }
        if self.failed() > 0 {
            let _ = write!(output, ", {} failed", self.failed());
        }
        output.push('\n');
        if let Some(err) = &self.journal_error {
            let _ = writeln!(output, "Undo information could not be saved: {}", err);
        } else if self.renamed() > 0 {
            output.push_str("Run `medianame undo` to revert.\n");
        }
        output
    }
}

impl OutputFormatter for OrganizeReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failed() == 0 && self.journal_error.is_none(),
            "operation": "organize",
            "summary": {
                "moved": self.moved(),
                "skipped": self.skipped(),
                "failed": self.failed(),
            },
            "items": self.items,
            "journal_error": self.journal_error,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("✓ Moved {} files into date folders", self.moved());
        if self.skipped() > 0 {
            let _ = write!(output, ", skipped {}", self.skipped());
        }
        if self.failed() > 0 {
            let _ = write!(output, ", {} failed", self.failed());
        }
        output.push('\n');
        if let Some(err) = &self.journal_error {
            let _ = writeln!(output, "Undo information could not be saved: {}", err);
        }
        output
    }
}

impl OutputFormatter for UndoReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failed == 0,
            "operation": "undo",
            "nothing_to_undo": self.nothing_to_undo,
            "summary": {
                "restored": self.restored,
                "missing": self.missing,
                "blocked": self.blocked,
                "failed": self.failed,
            },
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.nothing_to_undo {
            return String::new();
        }
        let mut output = format!("✓ Restored {} files", self.restored);
        if self.missing > 0 {
            let _ = write!(output, ", {} no longer present", self.missing);
        }
        if self.blocked > 0 {
            let _ = write!(output, ", {} left in place", self.blocked);
        }
        if self.failed > 0 {
            let _ = write!(output, ", {} failed", self.failed);
        }
        output.push('\n');
        output
    }
}

impl OutputFormatter for DuplicateReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "duplicates",
            "has_duplicates": self.has_duplicates,
            "duplicates": self.duplicate_base_names,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.has_duplicates {
            format!("{} duplicate titles\n", self.duplicate_base_names.len())
        } else {
            String::new()
        }
    }
}

impl OutputFormatter for BackupResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "backup",
            "backup_dir": self.backup_dir,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        String::new()
    }
}

impl OutputFormatter for TitlesResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "titles",
            "folder": self.folder,
            "titles": self.titles,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} unique titles\n", self.titles.len())
    }
}

impl OutputFormatter for StatusResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "status",
            "folder": self.folder,
            "undo_pending": self.undo_pending,
            "undo_records": self.undo_records,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        match &self.folder {
            Some(folder) => {
                let _ = writeln!(output, "Folder: {}", folder.display());
            },
            None => output.push_str("Folder: (none selected)\n"),
        }
        if self.undo_pending {
            let _ = writeln!(output, "Undo available: {} changes", self.undo_records);
        } else {
            output.push_str("Undo available: no\n");
        }
        output
    }
}
