//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the CLI command implementations.

use crate::app::models::WellInfo;
use crate::config::ExtractorConfig;
use crate::constants::LAS_FILE_EXTENSIONS;
use crate::{Error, ExtractStats, Result};
use anyhow::Context;
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Run statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files extracted successfully
    pub files_processed: usize,
    /// Files rejected or failed
    pub files_failed: usize,
    /// Datasets across all extracted wells
    pub datasets: usize,
    /// Curve data files written
    pub curve_files: usize,
    /// Data rows written
    pub rows_written: usize,
    /// Total processing time
    pub processing_time: Duration,
    /// Rejected inputs with their reason
    pub failures: Vec<(PathBuf, String)>,
}

impl RunSummary {
    pub fn record_success(&mut self, stats: &ExtractStats) {
        self.files_processed += 1;
        self.datasets += stats.datasets;
        self.curve_files += stats.curve_files;
        self.rows_written += stats.rows_written;
    }

    pub fn record_failure(&mut self, input: &Path, reason: impl ToString) {
        self.files_failed += 1;
        self.failures.push((input.to_path_buf(), reason.to_string()));
    }

    /// True when at least one input failed
    pub fn has_failures(&self) -> bool {
        self.files_failed > 0
    }
}

/// Machine-readable run report
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub wells: &'a [WellInfo],
    pub failures: Vec<JsonFailure>,
    pub files_processed: usize,
    pub files_failed: usize,
    pub curve_files: usize,
    pub rows_written: usize,
    pub processing_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonFailure {
    pub input: PathBuf,
    pub reason: String,
}

impl<'a> JsonReport<'a> {
    pub fn new(summary: &RunSummary, wells: &'a [WellInfo]) -> Self {
        Self {
            wells,
            failures: summary
                .failures
                .iter()
                .map(|(input, reason)| JsonFailure {
                    input: input.clone(),
                    reason: reason.clone(),
                })
                .collect(),
            files_processed: summary.files_processed,
            files_failed: summary.files_failed,
            curve_files: summary.curve_files,
            rows_written: summary.rows_written,
            processing_seconds: summary.processing_time.as_secs_f64(),
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("las_extractor={}", log_level)));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from an explicit file, the default location, or defaults
pub fn load_configuration(config_file: Option<&Path>) -> Result<ExtractorConfig> {
    if let Some(path) = config_file {
        info!("Using config file: {}", path.display());
        return ExtractorConfig::load(path);
    }

    match ExtractorConfig::default_config_path().filter(|path| path.exists()) {
        Some(path) => {
            info!("Using config file: {}", path.display());
            ExtractorConfig::load(&path)
        }
        None => {
            info!("No config file found, using defaults");
            Ok(ExtractorConfig::default())
        }
    }
}

/// Expand input arguments into a sorted list of LAS files
///
/// Each argument may be a file (taken as-is), a directory (searched
/// recursively for LAS files) or a glob pattern.
pub fn discover_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(discover_las_files(path));
        } else if is_glob_pattern(input) {
            let matches =
                glob::glob(input).with_context(|| format!("Invalid glob pattern: {}", input))?;
            for entry in matches {
                let matched = entry.with_context(|| format!("Failed to read match of {}", input))?;
                if matched.is_file() {
                    files.push(matched);
                }
            }
        } else {
            anyhow::bail!("Input not found: {}", input);
        }
    }

    files.sort();
    files.dedup();
    debug!("Discovered {} input files", files.len());
    Ok(files)
}

/// LAS files under a directory, recursively
pub fn discover_las_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_las_file(entry.path()))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// True for paths with a LAS extension (case-insensitive)
pub fn is_las_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            LAS_FILE_EXTENSIONS
                .iter()
                .any(|las| ext.eq_ignore_ascii_case(las))
        })
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Create a progress bar with consistent styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a well description; `detailed` adds header fields and parameters
pub fn print_well(well: &WellInfo, detailed: bool) {
    println!("{} {}", "🛢️  Well:".bold(), well.name.bright_cyan().bold());
    if let Some(filename) = &well.filename {
        println!("   {} {}", "File:".bright_black(), filename);
    }

    if detailed {
        for (mnemonic, field) in &well.fields {
            println!(
                "   {:<8} {:<8} {:<24} {}",
                mnemonic.bright_yellow(),
                field.unit,
                field.value,
                field.description.bright_black()
            );
        }
    }

    for dataset in &well.datasets {
        println!(
            "   📦 {} {} {}..{} {} (step {}, {} rows)",
            "Dataset".bold(),
            dataset.name.bright_green(),
            dataset.top,
            dataset.bottom,
            dataset.unit,
            dataset.step,
            dataset.count
        );

        if detailed {
            for param in &dataset.params {
                println!(
                    "      {} {} {} {}",
                    param.mnem.bright_yellow(),
                    param.value,
                    param.unit,
                    param.description.bright_black()
                );
            }
        }

        for curve in &dataset.curves {
            let shape = if curve.dimension > 1 {
                format!("{}[{}]", curve.format, curve.dimension)
            } else {
                curve.format.to_string()
            };
            println!(
                "      {:<12} {:<8} {:<10} {}",
                curve.name.bright_white(),
                curve.unit,
                shape,
                curve.description.bright_black()
            );
        }
    }
}

/// Print the end-of-run summary
pub fn print_summary(summary: &RunSummary) {
    println!();
    if summary.has_failures() {
        println!("{}", "⚠️  Extraction finished with failures".bright_yellow().bold());
    } else {
        println!("{}", "✅ Extraction complete".bright_green().bold());
    }

    println!(
        "   📄 Files: {} extracted, {} failed",
        summary.files_processed.to_string().bright_green(),
        summary.files_failed.to_string().bright_red()
    );
    println!(
        "   📈 {} datasets, {} curve files, {} rows",
        summary.datasets, summary.curve_files, summary.rows_written
    );
    println!("   ⏱️  {}", HumanDuration(summary.processing_time));

    for (input, reason) in &summary.failures {
        println!("   {} {}: {}", "✗".red(), input.display(), reason.red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_las_file() {
        assert!(is_las_file(Path::new("a.las")));
        assert!(is_las_file(Path::new("dir/B.LAS")));
        assert!(!is_las_file(Path::new("a.txt")));
        assert!(!is_las_file(Path::new("las")));
    }

    #[test]
    fn test_discover_inputs_from_dir_file_and_glob() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("a.las"), "").unwrap();
        std::fs::write(nested.join("b.LAS"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let from_dir = discover_inputs(&[dir.path().display().to_string()]).unwrap();
        assert_eq!(from_dir.len(), 2);

        let pattern = format!("{}/*.las", dir.path().display());
        let explicit = dir.path().join("notes.txt").display().to_string();
        let mixed = discover_inputs(&[pattern, explicit]).unwrap();
        assert_eq!(mixed.len(), 2);
        assert!(mixed.iter().any(|p| p.ends_with("notes.txt")));
    }

    #[test]
    fn test_discover_inputs_missing_path() {
        let result = discover_inputs(&["/definitely/not/here.las".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_summary_counts() {
        let mut summary = RunSummary::default();
        let stats = ExtractStats {
            datasets: 2,
            curve_files: 5,
            rows_written: 100,
            ..Default::default()
        };

        summary.record_success(&stats);
        summary.record_failure(Path::new("bad.las"), "wrong format");

        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.curve_files, 5);
        assert!(summary.has_failures());

        let report = JsonReport::new(&summary, &[]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files_failed"], 1);
        assert_eq!(json["failures"][0]["reason"], "wrong format");
    }

    #[test]
    fn test_load_configuration_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "curve_file_extension = \"dat\"\n").unwrap();

        let config = load_configuration(Some(&path)).unwrap();
        assert_eq!(config.curve_file_extension, "dat");
    }
}
