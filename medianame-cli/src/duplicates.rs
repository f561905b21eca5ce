use anyhow::{Context, Result};
use medianame_core::detect_duplicates;
use std::path::Path;

use crate::session::Session;

pub fn handle_duplicates(session: &Session, folder: &Path) -> Result<()> {
    let mut reporter = session.reporter();
    let report = detect_duplicates(folder, reporter.as_mut())
        .context("Failed to check for duplicate titles")?;
    session.print(&report);
    Ok(())
}
