//! Command implementations for the LAS extractor CLI
//!
//! Each command is implemented in its own module:
//! - `extract`: Batch extraction into the storage root
//! - `inspect`: Read-only parsing of a single file

pub mod extract;
pub mod inspect;
pub mod shared;

pub use shared::RunSummary;

use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Dispatch to the subcommand handler
pub async fn run(args: Args, cancellation_token: CancellationToken) -> anyhow::Result<RunSummary> {
    match args.get_command() {
        Some(Commands::Extract(extract_args)) => {
            extract::run_extract(extract_args, cancellation_token).await
        }
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        None => anyhow::bail!("No command given; run with --help for usage"),
    }
}
