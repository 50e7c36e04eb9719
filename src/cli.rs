//! Command-line interface
//!
//! Flags that override the settings file and control logging.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// relcheck - Daily Status Check: Reliability Tests
///
/// Record per-room, per-tester readings in a terminal form and export
/// them as a checklist text file.
#[derive(Debug, Parser)]
#[command(name = "relcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a custom settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the export file is written to
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Path of the log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
