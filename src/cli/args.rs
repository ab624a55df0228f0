//! Command-line argument definitions for the LAS extractor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::constants::DEFAULT_USER;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the LAS extractor
///
/// Converts LAS 2.0/3.0 well-log files into a well description plus one
/// flat data file per curve.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "las-extractor",
    version,
    about = "Extract well-log curves from LAS 2.0/3.0 files",
    long_about = "Reads LAS (Log ASCII Standard) 2.0 and 3.0 well-log files, validates their \
                  section structure, and writes one data file per curve into a content-addressed \
                  storage directory. Prints the resulting well descriptions as a summary or JSON."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract curves from LAS files into the storage root
    Extract(ExtractArgs),
    /// Parse a single LAS file and print its description without keeping any output
    Inspect(InspectArgs),
}

/// Arguments for the extract command
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// LAS files, directories or glob patterns
    ///
    /// Directories are searched recursively for `*.las` files.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Root directory for curve data files
    ///
    /// Overrides the configuration file. Defaults to the platform data
    /// directory (e.g. ~/.local/share/las-extractor).
    #[arg(
        short = 's',
        long = "storage-root",
        value_name = "PATH",
        help = "Root directory for curve data files"
    )]
    pub storage_root: Option<PathBuf>,

    /// Owner identity used to derive storage paths
    #[arg(
        short = 'u',
        long = "user",
        value_name = "NAME",
        default_value = DEFAULT_USER,
        help = "Owner identity used to derive storage paths"
    )]
    pub user: String,

    /// Name of an already known well
    ///
    /// When given, WELL and PARAMETER sections of the files are not read
    /// into the well description.
    #[arg(
        short = 'w',
        long = "well",
        value_name = "NAME",
        help = "Attach curves to a known well instead of reading well fields"
    )]
    pub well: Option<String>,

    /// Keep the input files after extraction
    #[arg(long = "keep-source", help = "Keep input files after extraction")]
    pub keep_source: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/las-extractor/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// LAS file to inspect
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Output format for the well description
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the well description"
    )]
    pub output_format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl ExtractArgs {
    /// Validate the extract command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(Error::configuration("User must not be empty"));
        }

        if let Some(well) = &self.well {
            if well.trim().is_empty() {
                return Err(Error::configuration("Well name must not be empty"));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}

impl InspectArgs {
    /// Validate the inspect command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(Error::file_not_found(self.input.display().to_string()));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
