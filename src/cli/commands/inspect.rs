//! Inspect command implementation
//!
//! Parses one LAS file into a scratch storage root and prints the well
//! description. The input is kept and the curve files are discarded.

use super::shared::{RunSummary, print_well, setup_logging};
use crate::app::models::{ImportData, WellInfo};
use crate::app::services::las_parser::LasExtractor;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::config::ExtractorConfig;
use crate::constants::DEFAULT_USER;
use anyhow::Context;
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, info};

/// Inspect command runner
pub async fn run_inspect(args: InspectArgs) -> anyhow::Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), false)?;
    args.validate()?;

    let scratch = TempDir::new().context("Failed to create scratch storage directory")?;
    debug!("Scratch storage at {}", scratch.path().display());

    let config = ExtractorConfig::default()
        .with_storage_root(scratch.path())
        .with_keep_source();
    let extractor = LasExtractor::new(config);

    let outcome = extractor
        .extract(&args.input, ImportData::new(DEFAULT_USER))
        .await
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let well = without_paths(outcome.well);
    match args.output_format {
        OutputFormat::Human => print_well(&well, true),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&well)
                .context("Failed to serialize well description")?;
            println!("{}", json);
        }
    }

    let mut summary = RunSummary::default();
    summary.record_success(&outcome.stats);
    summary.processing_time = start_time.elapsed();

    info!(
        "Inspected {} in {:.2}s",
        args.input.display(),
        summary.processing_time.as_secs_f64()
    );
    Ok(summary)
}

/// Curve files live in the scratch directory only, so their paths are dropped
fn without_paths(mut well: WellInfo) -> WellInfo {
    for dataset in &mut well.datasets {
        for curve in &mut dataset.curves {
            curve.path = None;
        }
    }
    well
}
