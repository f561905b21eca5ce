use crate::error::{Error, Result};
use crate::reporter::Reporter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const BACKUP_PREFIX: &str = "backup_";

/// Copy every regular file directly inside `folder` into a new
/// `backup_YYYYMMDD_HHMMSS` subdirectory and return its path.
///
/// Subdirectories are not copied. The first failing copy aborts the backup;
/// files already copied stay where they are.
pub fn backup_folder(folder: &Path, reporter: &mut dyn Reporter) -> Result<PathBuf> {
    let files = regular_files(folder)?;
    let backup_dir = create_backup_dir(folder)?;
    let copied = copy_into(&files, &backup_dir, reporter)?;

    let label = backup_dir
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    reporter.info(&format!("Backup created at: {}", label));
    reporter.warn("Warning: subdirectories are not included in the backup.");
    tracing::info!(backup = %backup_dir.display(), files = copied, "backup created");

    Ok(backup_dir)
}

fn regular_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries: Vec<PathBuf> = fs::read_dir(folder)
        .map_err(|e| Error::read_dir(folder, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .map_err(|e| Error::read_dir(folder, e))?;
    Ok(entries.into_iter().filter(|p| p.is_file()).collect())
}

/// Copy `files` into `backup_dir` in order, stopping at the first failure
fn copy_into(files: &[PathBuf], backup_dir: &Path, reporter: &mut dyn Reporter) -> Result<usize> {
    let mut copied = 0;
    for source in files {
        if let Some(name) = source.file_name() {
            fs::copy(source, backup_dir.join(name)).map_err(|e| {
                reporter.error(&format!("Error creating backup: {}", e));
                tracing::error!(file = %source.display(), error = %e, "backup copy failed");
                Error::io("copy", source, e)
            })?;
            copied += 1;
        }
        reporter.progress(crate::percent(copied, files.len()));
    }
    Ok(copied)
}

/// Create a fresh backup directory, adding a counter if the timestamped name is taken
fn create_backup_dir(folder: &Path) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut candidate = folder.join(format!("{}{}", BACKUP_PREFIX, stamp));
    let mut attempt = 1;

    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                candidate = folder.join(format!("{}{}_{}", BACKUP_PREFIX, stamp, attempt));
                attempt += 1;
            },
            Err(e) => return Err(Error::io("create backup directory", &candidate, e)),
        }
    }
}
