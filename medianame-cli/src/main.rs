use anyhow::{anyhow, Context, Result};
use clap::Parser;
use medianame_core::{state_dir, OutputFormat, RenameMode, Settings};
use serde_json::json;
use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod backup;
mod cli;
mod duplicates;
mod organize;
mod rename;
mod session;
mod status;
mod titles;
mod undo;

use cli::{Cli, Commands};
use session::{CliError, Session};

const LOG_FILE: &str = "medianame.log";

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            if matches!(e.downcast_ref::<CliError>(), Some(CliError::Cancelled)) {
                eprintln!("{e}");
            } else {
                eprintln!("Error: {e:#}");
            }
            process::exit(exit_code(&e));
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    if matches!(cli.command, Commands::Version) {
        print_version(cli.output.into());
        return Ok(());
    }

    let working_dir = std::env::current_dir().context("Failed to read the working directory")?;
    let state_dir = state_dir(&working_dir);
    let settings = Settings::load_or_default(&state_dir)?;

    if let Err(e) = init_logging(&state_dir, &settings, cli.verbose) {
        eprintln!("Warning: file logging disabled: {e:#}");
    }

    let use_color = !cli.no_color
        && settings
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal());

    let session = Session {
        state_dir,
        settings,
        output: cli.output.into(),
        use_color,
        quiet: cli.quiet,
        yes: cli.yes,
    };
    let folder = cli.folder.as_deref();

    tracing::debug!(command = ?cli.command, "starting");

    match cli.command {
        Commands::Titles => titles::handle_titles(&session, &session.resolve_folder(folder)?),
        Commands::Duplicates => {
            duplicates::handle_duplicates(&session, &session.resolve_folder(folder)?)
        },
        Commands::Backup => backup::handle_backup(&session, &session.resolve_folder(folder)?),
        Commands::Replace {
            patterns,
            replacement,
            rename,
        } => rename::handle_rename(
            &session,
            &session.resolve_folder(folder)?,
            &patterns,
            &RenameMode::Replace(replacement),
            &rename,
        ),
        Commands::Remove { patterns, rename } => rename::handle_rename(
            &session,
            &session.resolve_folder(folder)?,
            &patterns,
            &RenameMode::Remove,
            &rename,
        ),
        Commands::Organize { backup } => {
            organize::handle_organize(&session, &session.resolve_folder(folder)?, backup)
        },
        Commands::Undo => undo::handle_undo(&session),
        Commands::Status => status::handle_status(&session, folder),
        // Answered before the state directory is touched
        Commands::Version => Ok(()),
    }
}

/// Send core events to `.medianame/medianame.log`.
///
/// `RUST_LOG` wins over `--verbose`, which wins over the configured filter.
fn init_logging(state_dir: &Path, settings: &Settings, verbose: bool) -> Result<()> {
    fs::create_dir_all(state_dir)
        .with_context(|| format!("Failed to create {}", state_dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(state_dir.join(LOG_FILE))
        .context("Failed to open the log file")?;

    let default_directive = if verbose {
        "debug"
    } else {
        settings.defaults.log_filter.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("{e}"))
}

fn print_version(output: OutputFormat) {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    match output {
        OutputFormat::Json => println!("{}", json!({ "name": name, "version": version })),
        OutputFormat::Summary => println!("{name} {version}"),
    }
}

/// 1 = cancelled, 2 = invalid input or missing folder, 3 = anything else
fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return match cli_error {
            CliError::Cancelled => 1,
            CliError::NoFolder | CliError::NotADirectory(_) | CliError::NoPatterns => 2,
        };
    }

    match error.downcast_ref::<medianame_core::Error>() {
        Some(
            medianame_core::Error::InvalidPatterns(_)
            | medianame_core::Error::ReadDir { .. }
            | medianame_core::Error::Config { .. },
        ) => 2,
        _ => 3,
    }
}
