use crate::error::Result;
use crate::inventory::list_files;
use crate::reporter::Reporter;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Outcome of the advisory duplicate check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateReport {
    pub has_duplicates: bool,
    pub duplicate_base_names: BTreeSet<String>,
}

/// Find base names shared by more than one supported file.
///
/// Matching ignores the extension, so `title.mp4` and `title.pdf` collide.
/// Nothing is blocked here; the caller decides whether to ask before going on.
pub fn detect_duplicates(folder: &Path, reporter: &mut dyn Reporter) -> Result<DuplicateReport> {
    let files = list_files(folder)?;
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for (i, file) in files.iter().enumerate() {
        *counts.entry(file.base_name()).or_insert(0) += 1;
        reporter.progress(crate::percent(i + 1, files.len()));
    }

    let duplicate_base_names: BTreeSet<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();

    if duplicate_base_names.is_empty() {
        reporter.info("No duplicate filenames detected.");
        tracing::info!(folder = %folder.display(), "no duplicates found");
    } else {
        reporter.warn("Duplicate filenames detected:");
        for name in &duplicate_base_names {
            reporter.warn(&format!("- {}", name));
        }
        tracing::warn!(
            folder = %folder.display(),
            duplicates = ?duplicate_base_names,
            "duplicates found"
        );
    }

    Ok(DuplicateReport {
        has_duplicates: !duplicate_base_names.is_empty(),
        duplicate_base_names,
    })
}
