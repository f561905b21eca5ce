use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Safe batch renaming for folders of videos and PDFs, with preview and undo
#[derive(Parser, Debug)]
#[command(name = "medianame")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Folder to work on. Remembered, so later runs can leave it out.
    #[arg(short = 'C', long = "folder", global = true, value_name = "PATH")]
    pub folder: Option<PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Assume yes for all prompts
    #[arg(
        short = 'y',
        long = "yes",
        global = true,
        env = "MEDIANAME_YES",
        value_parser = FalseyValueParser::new()
    )]
    pub yes: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,

    /// Only print warnings and errors (and JSON when --output json)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write debug events to the log file
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by the renaming commands
#[derive(Args, Debug, Clone)]
pub struct RenameArgs {
    /// Show the preview without renaming anything
    #[arg(long)]
    pub dry_run: bool,

    /// Back up the folder before renaming
    #[arg(long)]
    pub backup: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the unique titles of the supported files in the folder
    Titles,

    /// Report titles shared by more than one file (e.g. talk.mp4 and talk.pdf)
    Duplicates,

    /// Copy the folder's files into a new backup_<timestamp> directory
    Backup,

    /// Replace regex matches in file names (extensions are never touched)
    Replace {
        /// Comma-separated regex patterns, matched case-insensitively and applied in order
        #[arg(value_delimiter = ',', required = true)]
        patterns: Vec<String>,

        /// Replacement text; $1, $2 ... expand capture groups, write $$ for a literal $
        #[arg(long = "with", value_name = "TEXT")]
        replacement: String,

        #[command(flatten)]
        rename: RenameArgs,
    },

    /// Remove regex matches from file names
    Remove {
        /// Comma-separated regex patterns, matched case-insensitively and applied in order
        #[arg(value_delimiter = ',', required = true)]
        patterns: Vec<String>,

        #[command(flatten)]
        rename: RenameArgs,
    },

    /// Move files into YYYY-MM-DD folders named after their creation date
    Organize {
        /// Back up the folder before moving files
        #[arg(long)]
        backup: bool,
    },

    /// Revert the most recent rename or organize run
    Undo,

    /// Show the remembered folder and whether an undo is available
    Status,

    /// Show version information
    Version,
}
