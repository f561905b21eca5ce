//! Output and progress sink shared by every operation.
//!
//! Operations take a `&mut dyn Reporter` instead of writing to stdout, so a
//! CLI, a GUI or a test can decide where status lines and progress go.

use nu_ansi_term::Color;
use serde::Serialize;

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLevel {
    Info,
    Warning,
    Error,
}

pub trait Reporter {
    /// Record one human-readable line at the given level
    fn line(&mut self, level: ReportLevel, message: &str);

    /// Percentage complete (0-100), called after each processed item
    fn progress(&mut self, _percent: f64) {}

    fn info(&mut self, message: &str) {
        self.line(ReportLevel::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.line(ReportLevel::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.line(ReportLevel::Error, message);
    }
}

/// Writes info lines to stdout and warnings/errors to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    use_color: bool,
    problems_only: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            problems_only: false,
        }
    }

    /// Drops info lines; skips and failures still reach stderr
    pub fn problems_only(use_color: bool) -> Self {
        Self {
            use_color,
            problems_only: true,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn line(&mut self, level: ReportLevel, message: &str) {
        match level {
            ReportLevel::Info if self.problems_only => {},
            ReportLevel::Info => println!("{}", message),
            ReportLevel::Warning if self.use_color => {
                eprintln!("{}", Color::Yellow.paint(message));
            },
            ReportLevel::Warning => eprintln!("{}", message),
            ReportLevel::Error if self.use_color => {
                eprintln!("{}", Color::Red.bold().paint(message));
            },
            ReportLevel::Error => eprintln!("{}", message),
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn line(&mut self, _level: ReportLevel, _message: &str) {}
}

/// Keeps every line and progress value in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    pub lines: Vec<(ReportLevel, String)>,
    pub progress: Vec<f64>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded at `level`
    pub fn at(&self, level: ReportLevel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// True if any recorded line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|(_, m)| m.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn line(&mut self, level: ReportLevel, message: &str) {
        self.lines.push((level, message.to_string()));
    }

    fn progress(&mut self, percent: f64) {
        self.progress.push(percent);
    }
}
