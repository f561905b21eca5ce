use anyhow::{Context, Result};
use medianame_core::{
    ConsoleReporter, LastFolderConfig, OutputFormat, OutputFormatter, Reporter, Settings, UndoLog,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Errors raised by the command shell itself
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Operation cancelled.")]
    Cancelled,

    #[error("No folder selected. Pass --folder <PATH>; it is remembered for later runs.")]
    NoFolder,

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("No patterns given")]
    NoPatterns,
}

/// Everything a command handler needs besides its own arguments
pub struct Session {
    pub state_dir: PathBuf,
    pub settings: Settings,
    pub output: OutputFormat,
    pub use_color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Session {
    /// JSON output and --quiet keep stdout clean but still show skips and failures
    pub fn reporter(&self) -> Box<dyn Reporter> {
        if self.shows_details() {
            Box::new(ConsoleReporter::new(self.use_color))
        } else {
            Box::new(ConsoleReporter::problems_only(self.use_color))
        }
    }

    pub fn journal(&self) -> UndoLog {
        UndoLog::in_state_dir(&self.state_dir)
    }

    pub fn last_folder_path(&self) -> PathBuf {
        LastFolderConfig::path_in(&self.state_dir)
    }

    pub fn shows_details(&self) -> bool {
        !self.quiet && self.output == OutputFormat::Summary
    }

    pub fn print(&self, result: &impl OutputFormatter) {
        match self.output {
            OutputFormat::Json => println!("{}", result.format_json()),
            OutputFormat::Summary if !self.quiet => print!("{}", result.format_summary()),
            OutputFormat::Summary => {},
        }
    }

    /// Ask a yes/no question on stderr, unless --yes was given
    pub fn confirm(&self, question: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        confirm_with_input(question, &mut io::stdin().lock())
    }

    /// Pick the folder to work on and remember it.
    ///
    /// `--folder` wins; otherwise the last remembered folder is used.
    pub fn resolve_folder(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        let config_path = self.last_folder_path();
        let folder = match explicit {
            Some(path) => path.to_path_buf(),
            None => LastFolderConfig::load(&config_path)
                .folder()
                .ok_or(CliError::NoFolder)?,
        };

        if !folder.is_dir() {
            return Err(CliError::NotADirectory(folder).into());
        }
        let folder = fs::canonicalize(&folder)
            .with_context(|| format!("Failed to resolve folder: {}", folder.display()))?;

        LastFolderConfig {
            last_folder: folder.display().to_string(),
        }
        .save(&config_path)
        .context("Failed to remember the selected folder")?;

        tracing::debug!(folder = %folder.display(), "selected folder");
        Ok(folder)
    }
}

pub fn confirm_with_input<R: BufRead>(question: &str, reader: &mut R) -> Result<bool> {
    eprint!("{question} [y/N]: ");
    io::stderr().flush()?;

    let mut response = String::new();
    reader.read_line(&mut response)?;
    let response = response.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}
