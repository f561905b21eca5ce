use anyhow::{Context, Result};

use crate::session::Session;

pub fn handle_undo(session: &Session) -> Result<()> {
    let mut reporter = session.reporter();
    let report = session
        .journal()
        .undo_last(reporter.as_mut())
        .context("Failed to undo the last batch")?;
    session.print(&report);
    Ok(())
}
