use crate::error::Result;
use crate::inventory::{directory_names, list_files};
use crate::pattern::PatternSet;
use crate::reporter::Reporter;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What matched text is substituted with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameMode {
    /// Substitute matches with the given text (regex replacement syntax)
    Replace(String),
    /// Delete matches
    Remove,
}

impl RenameMode {
    fn replacement(&self) -> &str {
        match self {
            Self::Replace(text) => text,
            Self::Remove => "",
        }
    }
}

/// One proposed rename inside the planned folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlanEntry {
    pub source_name: String,
    pub target_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A file with the target name was present when planning started
    TargetExists,
    /// The new name would contain a path separator
    InvalidName,
}

/// A candidate rename the planner refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSkip {
    pub source_name: String,
    pub target_name: String,
    pub reason: SkipReason,
}

/// Result of planning. Holds no filesystem state and can be dropped freely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenamePlan {
    pub folder: PathBuf,
    pub entries: Vec<RenamePlanEntry>,
    pub skipped: Vec<PlanSkip>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Targets claimed by more than one entry of this plan, with their sources.
    ///
    /// The planner only checks candidates against the listing taken when
    /// planning started, so two files can map to the same new name. At apply
    /// time the first one wins and the others are skipped.
    pub fn internal_collisions(&self) -> Vec<(String, Vec<String>)> {
        let mut by_target: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for entry in &self.entries {
            by_target
                .entry(entry.target_name.as_str())
                .or_default()
                .push(entry.source_name.clone());
        }
        by_target
            .into_iter()
            .filter(|(_, sources)| sources.len() > 1)
            .map(|(target, sources)| (target.to_string(), sources))
            .collect()
    }
}

/// Compute the renames `patterns` would produce in `folder`, without touching it.
///
/// Each supported file's base name goes through every pattern in order; the
/// extension is kept as is. A candidate whose name already exists in the
/// folder is skipped and reported rather than planned.
pub fn plan_renames(
    folder: &Path,
    patterns: &PatternSet,
    mode: &RenameMode,
    reporter: &mut dyn Reporter,
) -> Result<RenamePlan> {
    let files = list_files(folder)?;
    let existing = directory_names(folder)?;
    let mut plan = RenamePlan {
        folder: folder.to_path_buf(),
        ..RenamePlan::default()
    };

    for (i, file) in files.iter().enumerate() {
        let base = file.base_name();
        let new_base = patterns.substitute(base, mode.replacement());

        if new_base != base && !new_base.trim().is_empty() {
            let candidate = format!("{}{}", new_base, file.extension);

            if new_base.contains(['/', '\\']) {
                reporter.warn(&format!(
                    "[SKIP] {} -> {} (New name contains a path separator)",
                    file.name, candidate
                ));
                tracing::warn!(source = %file.name, target = %candidate, "skipping rename (path separator)");
                plan.skipped.push(PlanSkip {
                    source_name: file.name.clone(),
                    target_name: candidate,
                    reason: SkipReason::InvalidName,
                });
            } else if existing.contains(&candidate) && candidate != file.name {
                reporter.warn(&format!(
                    "[SKIP] {} -> {} (Target exists, skipping to prevent overwrite)",
                    file.name, candidate
                ));
                tracing::warn!(source = %file.name, target = %candidate, "skipping rename (target exists)");
                plan.skipped.push(PlanSkip {
                    source_name: file.name.clone(),
                    target_name: candidate,
                    reason: SkipReason::TargetExists,
                });
            } else {
                plan.entries.push(RenamePlanEntry {
                    source_name: file.name.clone(),
                    target_name: candidate,
                });
            }
        }

        reporter.progress(crate::percent(i + 1, files.len()));
    }

    if plan.entries.is_empty() {
        reporter.info("No changes to preview.");
    } else {
        reporter.info("Preview of changes:");
        for entry in &plan.entries {
            reporter.info(&format!("{} -> {}", entry.source_name, entry.target_name));
        }
    }

    tracing::info!(
        folder = %folder.display(),
        patterns = ?patterns.sources(),
        planned = plan.entries.len(),
        skipped = plan.skipped.len(),
        "previewed changes"
    );
    Ok(plan)
}
