use anyhow::{anyhow, Context, Result};
use medianame_core::{list_files, organize_by_date, OrganizeReport, Reporter};
use std::path::Path;

use crate::backup::take_backup;
use crate::session::{CliError, Session};

pub fn handle_organize(session: &Session, folder: &Path, backup: bool) -> Result<()> {
    let mut reporter = session.reporter();

    let count = list_files(folder)?.len();
    if count == 0 {
        reporter.info("No supported files to organize.");
        session.print(&OrganizeReport::default());
        return Ok(());
    }

    if !session.confirm(&format!(
        "Move {count} files into folders named by creation date?"
    ))? {
        return Err(CliError::Cancelled.into());
    }

    if backup || session.settings.defaults.backup_first {
        take_backup(folder, reporter.as_mut())?;
    }

    let report = organize_by_date(folder, &session.journal(), reporter.as_mut())
        .context("Failed to organize files by date")?;
    session.print(&report);
    if let Some(err) = report.journal_error {
        return Err(anyhow!("Failed to save the undo log: {err}"));
    }
    Ok(())
}
