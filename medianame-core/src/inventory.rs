use crate::error::{Error, Result};
use crate::reporter::Reporter;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions every transformation operates on. Anything else is ignored.
pub const SUPPORTED_EXTENSIONS: [&str; 7] = [".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".pdf"];

/// A supported file directly inside the target folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Full file name, e.g. `lessonPart1.mp4`
    pub name: String,
    /// Extension including the dot, in its original case, e.g. `.MP4`
    pub extension: String,
}

impl FileEntry {
    /// Build an entry from a file name, returning `None` for unsupported extensions
    pub fn from_name(name: &str) -> Option<Self> {
        let extension = split_extension(name).1;
        if !has_supported_extension(extension) {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Name with the extension removed
    pub fn base_name(&self) -> &str {
        &self.name[..self.name.len() - self.extension.len()]
    }

    pub fn path_in(&self, folder: &Path) -> PathBuf {
        folder.join(&self.name)
    }
}

/// Case-insensitive membership test against [`SUPPORTED_EXTENSIONS`].
/// `extension` includes the leading dot.
pub fn has_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(extension))
}

/// Split `name` into base name and extension (with dot).
///
/// A leading dot does not start an extension, so `.mp4` has no extension.
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// List supported regular files directly inside `folder`, sorted by name.
pub fn list_files(folder: &Path) -> Result<Vec<FileEntry>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(folder).map_err(|e| Error::read_dir(folder, e))? {
        let entry = entry.map_err(|e| Error::read_dir(folder, e))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if !entry.path().is_file() {
            continue;
        }
        if let Some(file) = FileEntry::from_name(&name) {
            files.push(file);
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Every name present in `folder`, whatever its kind or extension.
///
/// This is the snapshot the planner checks candidate targets against.
pub fn directory_names(folder: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in fs::read_dir(folder).map_err(|e| Error::read_dir(folder, e))? {
        let entry = entry.map_err(|e| Error::read_dir(folder, e))?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Unique base names of the supported files in `folder`, sorted.
pub fn list_titles(folder: &Path, reporter: &mut dyn Reporter) -> Result<BTreeSet<String>> {
    let files = list_files(folder)?;
    let mut titles = BTreeSet::new();

    for (i, file) in files.iter().enumerate() {
        titles.insert(file.base_name().to_string());
        reporter.progress(crate::percent(i + 1, files.len()));
    }

    let folder_name = folder
        .file_name()
        .map_or_else(|| folder.display().to_string(), |n| n.to_string_lossy().into_owned());
    reporter.info(&format!("Folder: {}", folder_name));
    reporter.info("Unique file titles:");
    for title in &titles {
        reporter.info(&format!("- {}", title));
    }

    tracing::info!(folder = %folder.display(), count = titles.len(), "listed titles");
    Ok(titles)
}
