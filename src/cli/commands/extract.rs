//! Extract command implementation
//!
//! Expands the inputs, extracts each LAS file in turn and reports the
//! resulting wells. A rejected file is reported and does not stop the run.

use super::shared::{
    JsonReport, RunSummary, create_progress_bar, discover_inputs, load_configuration, print_summary,
    print_well, setup_logging,
};
use crate::app::models::{ImportData, WellInfo};
use crate::app::services::las_parser::LasExtractor;
use crate::cli::args::{ExtractArgs, OutputFormat};
use crate::config::ExtractorConfig;
use crate::Error;
use anyhow::Context;
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Extract command runner
pub async fn run_extract(
    args: ExtractArgs,
    cancellation_token: CancellationToken,
) -> anyhow::Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    info!("Starting LAS extraction");
    debug!("Extract arguments: {:?}", args);

    args.validate()?;
    let config = resolve_configuration(&args)?;

    std::fs::create_dir_all(&config.storage_root).with_context(|| {
        format!(
            "Failed to create storage root {}",
            config.storage_root.display()
        )
    })?;

    let inputs = discover_inputs(&args.inputs)?;
    if inputs.is_empty() {
        anyhow::bail!("No LAS files found in: {}", args.inputs.join(", "));
    }
    info!(
        "Extracting {} files into {}",
        inputs.len(),
        config.storage_root.display()
    );

    let extractor = LasExtractor::new(config);
    let progress = args
        .show_progress()
        .then(|| create_progress_bar(inputs.len() as u64, "Extracting"));

    let mut summary = RunSummary::default();
    let mut wells = Vec::new();

    for input in &inputs {
        if cancellation_token.is_cancelled() {
            warn!("Cancellation requested, stopping before {}", input.display());
            return Err(Error::processing_interrupted("Extraction cancelled by user").into());
        }

        if let Some(pb) = &progress {
            pb.set_message(display_name(input));
        }

        match extractor.extract(input, import_for(&args, input)).await {
            Ok(outcome) => {
                summary.record_success(&outcome.stats);
                wells.push(outcome.well);
            }
            Err(e) => {
                warn!("Failed to extract {}: {}", input.display(), e);
                summary.record_failure(input, &e);
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    summary.processing_time = start_time.elapsed();

    match args.output_format {
        OutputFormat::Human => {
            if !args.quiet {
                for well in &wells {
                    print_well(well, false);
                }
                print_summary(&summary);
            }
        }
        OutputFormat::Json => {
            let report = JsonReport::new(&summary, &wells);
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize extraction report")?;
            println!("{}", json);
        }
    }

    info!(
        "Extraction finished: {} ok, {} failed",
        summary.files_processed, summary.files_failed
    );
    Ok(summary)
}

/// Config file, then command-line overrides
fn resolve_configuration(args: &ExtractArgs) -> crate::Result<ExtractorConfig> {
    let mut config = load_configuration(args.config_file.as_deref())?;

    if let Some(storage_root) = &args.storage_root {
        config.storage_root = storage_root.clone();
    }
    if args.keep_source {
        config.remove_source = false;
    }

    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn import_for(args: &ExtractArgs, input: &Path) -> ImportData {
    let import = ImportData::new(args.user.as_str());
    match &args.well {
        Some(name) => {
            let mut well = WellInfo::new(name.as_str());
            well.filename = input
                .file_name()
                .map(|name| name.to_string_lossy().to_string());
            import.with_well(well)
        }
        None => import,
    }
}

fn display_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| input.display().to_string())
}
