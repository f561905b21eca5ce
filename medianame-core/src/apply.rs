use crate::error::Result;
use crate::journal::{UndoBatch, UndoLog};
use crate::plan::{RenamePlan, RenamePlanEntry};
use crate::reporter::Reporter;
use serde::Serialize;
use std::fs;

/// Result of one item in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ItemOutcome {
    Renamed,
    Moved,
    /// The target already existed; the file was left untouched
    SkippedCollision,
    /// The filesystem refused; the batch carried on
    Failed(String),
}

impl ItemOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Renamed | Self::Moved)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedEntry {
    #[serde(flatten)]
    pub entry: RenamePlanEntry,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// What `apply_plan` did, item by item, plus the batch it stored for undo
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyReport {
    pub items: Vec<AppliedEntry>,
    #[serde(skip)]
    pub batch: UndoBatch,
    /// Set when the renames happened but the undo batch could not be stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_error: Option<String>,
}

impl ApplyReport {
    pub fn renamed(&self) -> usize {
        self.count(ItemOutcome::is_applied)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::SkippedCollision))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items.iter().filter(|i| predicate(&i.outcome)).count()
    }
}

/// Apply a plan from [`plan_renames`](crate::plan_renames) and store its undo batch.
///
/// The target is checked again right before each rename, so a file created
/// since planning, or claimed by an earlier entry of the same plan, is never
/// overwritten. Per-item failures are reported and the batch continues; the
/// records collected so far are persisted even when some items failed.
/// If the journal cannot be written the report is still returned, with
/// `journal_error` set, so the caller learns which files changed.
pub fn apply_plan(
    plan: &RenamePlan,
    journal: &UndoLog,
    reporter: &mut dyn Reporter,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();
    let total = plan.entries.len();

    for (i, entry) in plan.entries.iter().enumerate() {
        let source = plan.folder.join(&entry.source_name);
        let target = plan.folder.join(&entry.target_name);

        let outcome = if crate::journal::path_taken(&target) {
            reporter.warn(&format!(
                "[SKIP] {} -> {} (Target exists, skipping to prevent overwrite)",
                entry.source_name, entry.target_name
            ));
            tracing::warn!(source = %entry.source_name, target = %entry.target_name, "skipping rename (target exists)");
            ItemOutcome::SkippedCollision
        } else {
            match fs::rename(&source, &target) {
                Ok(()) => {
                    report.batch.push(target, source);
                    reporter.info(&format!(
                        "Renamed: {} -> {}",
                        entry.source_name, entry.target_name
                    ));
                    tracing::info!(source = %entry.source_name, target = %entry.target_name, "renamed");
                    ItemOutcome::Renamed
                },
                Err(e) => {
                    reporter.error(&format!(
                        "Error renaming {} -> {}: {}",
                        entry.source_name, entry.target_name, e
                    ));
                    tracing::error!(source = %entry.source_name, error = %e, "rename failed");
                    ItemOutcome::Failed(e.to_string())
                },
            }
        };

        report.items.push(AppliedEntry {
            entry: entry.clone(),
            outcome,
        });
        reporter.progress(crate::percent(i + 1, total));
    }

    report.journal_error = crate::journal::store_or_report(journal, &report.batch, reporter);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;
    use std::path::Path;
    use tempfile::TempDir;

    fn entry(source: &str, target: &str) -> RenamePlanEntry {
        RenamePlanEntry {
            source_name: source.to_string(),
            target_name: target.to_string(),
        }
    }

    fn plan_in(folder: &Path, entries: Vec<RenamePlanEntry>) -> RenamePlan {
        RenamePlan {
            folder: folder.to_path_buf(),
            entries,
            skipped: vec![],
        }
    }

    #[test]
    fn test_empty_plan_changes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp4"), b"a").unwrap();
        let journal = UndoLog::in_state_dir(&dir.path().join(".medianame"));

        let report = apply_plan(
            &plan_in(dir.path(), vec![]),
            &journal,
            &mut RecordingReporter::new(),
        )
        .unwrap();

        assert!(report.items.is_empty());
        assert!(report.batch.is_empty());
        assert!(!journal.has_pending());
        assert!(!dir.path().join(".medianame").exists());
    }

    #[test]
    fn test_rename_records_undo() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lessonPart1.mp4"), b"video").unwrap();
        let journal = UndoLog::in_state_dir(dir.path());

        let mut reporter = RecordingReporter::new();
        let report = apply_plan(
            &plan_in(dir.path(), vec![entry("lessonPart1.mp4", "Part1.mp4")]),
            &journal,
            &mut reporter,
        )
        .unwrap();

        assert_eq!(report.renamed(), 1);
        assert_eq!(report.items[0].outcome, ItemOutcome::Renamed);
        assert!(dir.path().join("Part1.mp4").exists());
        assert!(!dir.path().join("lessonPart1.mp4").exists());
        assert!(reporter.contains("Renamed: lessonPart1.mp4 -> Part1.mp4"));

        let stored = journal.load().unwrap().unwrap();
        assert_eq!(stored.records[0].current_path, dir.path().join("Part1.mp4"));
        assert_eq!(
            stored.records[0].original_path,
            dir.path().join("lessonPart1.mp4")
        );
    }

    #[test]
    fn test_existing_target_is_never_overwritten() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("target.mp4"), b"keep me").unwrap();
        fs::write(dir.path().join("other.mp4"), b"other").unwrap();
        let journal = UndoLog::in_state_dir(dir.path());

        let report = apply_plan(
            &plan_in(dir.path(), vec![entry("other.mp4", "target.mp4")]),
            &journal,
            &mut RecordingReporter::new(),
        )
        .unwrap();

        assert_eq!(report.items[0].outcome, ItemOutcome::SkippedCollision);
        assert_eq!(fs::read(dir.path().join("target.mp4")).unwrap(), b"keep me");
        assert_eq!(fs::read(dir.path().join("other.mp4")).unwrap(), b"other");
        assert!(report.batch.is_empty());
    }

    #[test]
    fn test_first_entry_wins_shared_target() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Part1 v1.mp4"), b"one").unwrap();
        fs::write(dir.path().join("Part1 v2.mp4"), b"two").unwrap();
        let journal = UndoLog::in_state_dir(dir.path());

        let report = apply_plan(
            &plan_in(
                dir.path(),
                vec![
                    entry("Part1 v1.mp4", "Part1.mp4"),
                    entry("Part1 v2.mp4", "Part1.mp4"),
                ],
            ),
            &journal,
            &mut RecordingReporter::new(),
        )
        .unwrap();

        assert_eq!(report.renamed(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(fs::read(dir.path().join("Part1.mp4")).unwrap(), b"one");
        assert!(dir.path().join("Part1 v2.mp4").exists());
    }

    #[test]
    fn test_failure_does_not_stop_batch_or_lose_records() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp4"), b"a").unwrap();
        fs::write(dir.path().join("c.mp4"), b"c").unwrap();
        let journal = UndoLog::in_state_dir(dir.path());

        let mut reporter = RecordingReporter::new();
        let report = apply_plan(
            &plan_in(
                dir.path(),
                vec![
                    entry("a.mp4", "a2.mp4"),
                    entry("missing.mp4", "b2.mp4"),
                    entry("c.mp4", "c2.mp4"),
                ],
            ),
            &journal,
            &mut reporter,
        )
        .unwrap();

        assert_eq!(report.renamed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(matches!(report.items[1].outcome, ItemOutcome::Failed(_)));
        assert!(reporter.contains("Error renaming missing.mp4 -> b2.mp4"));
        assert_eq!(journal.load().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_unwritable_journal_still_returns_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lessonPart1.mp4"), b"video").unwrap();
        // A regular file where the state directory should be
        fs::write(dir.path().join("state"), b"not a directory").unwrap();
        let journal = UndoLog::in_state_dir(&dir.path().join("state"));

        let mut reporter = RecordingReporter::new();
        let report = apply_plan(
            &plan_in(dir.path(), vec![entry("lessonPart1.mp4", "Part1.mp4")]),
            &journal,
            &mut reporter,
        )
        .unwrap();

        assert_eq!(report.renamed(), 1);
        assert!(report.journal_error.is_some());
        assert!(dir.path().join("Part1.mp4").exists());
        assert!(reporter.contains("Renamed: lessonPart1.mp4 -> Part1.mp4"));
        assert!(reporter.contains("Could not save undo information"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_target_is_not_replaced() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lessonPart1.mp4"), b"video").unwrap();
        let target = dir.path().join("Part1.mp4");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &target).unwrap();
        let journal = UndoLog::in_state_dir(dir.path());

        let report = apply_plan(
            &plan_in(dir.path(), vec![entry("lessonPart1.mp4", "Part1.mp4")]),
            &journal,
            &mut RecordingReporter::new(),
        )
        .unwrap();

        assert_eq!(report.items[0].outcome, ItemOutcome::SkippedCollision);
        assert!(fs::symlink_metadata(&target).unwrap().file_type().is_symlink());
        assert!(dir.path().join("lessonPart1.mp4").exists());
    }
}
