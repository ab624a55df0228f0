use clap::Parser;
use las_extractor::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; never resolve
                std::future::pending::<()>().await;
            }
            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(las_extractor::Error::processing_interrupted(
                    "Extraction interrupted by user"
                ).into())
            }
        }
    });

    match result {
        Ok(summary) if summary.has_failures() => process::exit(1),
        Ok(_) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("LAS Extractor - Well-Log Curve Extraction");
    println!("=========================================");
    println!();
    println!("Convert LAS 2.0/3.0 well-log files into a well description plus one");
    println!("data file per curve, stored under a content-addressed directory tree.");
    println!();
    println!("USAGE:");
    println!("    las-extractor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract     Extract curves from LAS files into the storage root (main command)");
    println!("    inspect     Parse one LAS file and print its description");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract a directory of logs, keeping the inputs:");
    println!("    las-extractor extract --keep-source --storage-root /srv/curves logs/");
    println!();
    println!("    # Attach curves to a known well and report as JSON:");
    println!("    las-extractor extract --well A-1 --output-format json 'uploads/*.las'");
    println!();
    println!("    # Look at a file without writing anything:");
    println!("    las-extractor inspect well.las");
    println!();
    println!("For detailed help on any command, use:");
    println!("    las-extractor <COMMAND> --help");
}
