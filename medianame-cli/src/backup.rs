use anyhow::{Context, Result};
use medianame_core::{backup_folder, BackupResult, Reporter};
use std::path::{Path, PathBuf};

use crate::session::Session;

pub fn handle_backup(session: &Session, folder: &Path) -> Result<()> {
    let mut reporter = session.reporter();
    let backup_dir = take_backup(folder, reporter.as_mut())?;
    session.print(&BackupResult { backup_dir });
    Ok(())
}

/// Backup used before renaming or organizing; a failure stops the command
pub fn take_backup(folder: &Path, reporter: &mut dyn Reporter) -> Result<PathBuf> {
    backup_folder(folder, reporter)
        .with_context(|| format!("Failed to back up {}", folder.display()))
}
