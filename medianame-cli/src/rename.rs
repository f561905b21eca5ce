use anyhow::{anyhow, Result};
use medianame_core::{
    apply_plan, detect_duplicates, plan_renames, render_plan_table, PatternSet, RenameMode,
    Reporter, SilentReporter,
};
use std::path::Path;

use crate::backup::take_backup;
use crate::cli::RenameArgs;
use crate::session::{CliError, Session};

/// Shared flow of `replace` and `remove`: check, preview, confirm, apply
pub fn handle_rename(
    session: &Session,
    folder: &Path,
    patterns: &[String],
    mode: &RenameMode,
    args: &RenameArgs,
) -> Result<()> {
    let patterns: Vec<&str> = patterns
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if patterns.is_empty() {
        return Err(CliError::NoPatterns.into());
    }
    let patterns = PatternSet::compile(&patterns)?;

    let mut reporter = session.reporter();

    let duplicates = detect_duplicates(folder, reporter.as_mut())?;
    if duplicates.has_duplicates
        && !args.dry_run
        && !session.confirm("Duplicate titles found. Continue anyway?")?
    {
        return Err(CliError::Cancelled.into());
    }

    // The preview table carries the same lines the planner would report
    let plan = if session.shows_details() {
        plan_renames(folder, &patterns, mode, &mut SilentReporter)?
    } else {
        plan_renames(folder, &patterns, mode, reporter.as_mut())?
    };

    if session.shows_details() {
        if plan.entries.is_empty() && plan.skipped.is_empty() {
            println!("No changes to preview.");
        } else {
            println!("{}", render_plan_table(&plan, session.use_color));
        }
    }
    for (target, sources) in plan.internal_collisions() {
        reporter.warn(&format!(
            "Several files would become {}: {}. Only the first is renamed.",
            target,
            sources.join(", ")
        ));
    }

    if args.dry_run || plan.is_empty() {
        session.print(&plan);
        return Ok(());
    }

    if !session.confirm("Apply these changes?")? {
        return Err(CliError::Cancelled.into());
    }

    if args.backup || session.settings.defaults.backup_first {
        take_backup(folder, reporter.as_mut())?;
    }

    let report = apply_plan(&plan, &session.journal(), reporter.as_mut())?;
    session.print(&report);
    if let Some(err) = report.journal_error {
        return Err(anyhow!("Failed to save the undo log: {err}"));
    }
    Ok(())
}
