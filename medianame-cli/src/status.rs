use anyhow::{Context, Result};
use medianame_core::{LastFolderConfig, StatusResult};
use std::path::Path;

use crate::session::Session;

pub fn handle_status(session: &Session, explicit_folder: Option<&Path>) -> Result<()> {
    let folder = explicit_folder
        .map(Path::to_path_buf)
        .or_else(|| LastFolderConfig::load(&session.last_folder_path()).folder());
    let batch = session
        .journal()
        .load()
        .context("Failed to read the undo log")?;

    session.print(&StatusResult {
        folder,
        undo_pending: batch.is_some(),
        undo_records: batch.map_or(0, |b| b.len()),
    });
    Ok(())
}
