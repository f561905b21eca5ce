use anyhow::{Context, Result};
use medianame_core::{list_titles, TitlesResult};
use std::path::Path;

use crate::session::Session;

pub fn handle_titles(session: &Session, folder: &Path) -> Result<()> {
    let mut reporter = session.reporter();
    let titles = list_titles(folder, reporter.as_mut()).context("Failed to list file titles")?;

    session.print(&TitlesResult {
        folder: folder.to_path_buf(),
        titles,
    });
    Ok(())
}
