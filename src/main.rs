use clap::Parser;
use std::process;
use telemetry_viewer::TelemetryError;
use telemetry_viewer::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
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
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; never resolve
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(TelemetryError::processing_interrupted("Interrupted by user").into())
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Telemetry Viewer - Onboard Logger File Tool");
    println!("===========================================");
    println!();
    println!("Decode the telemetry record lines written by the onboard data logger");
    println!("and turn them into summaries, map tracks, chart series or exports.");
    println!();
    println!("USAGE:");
    println!("    telemetry-viewer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect     Summarise one or more logger files");
    println!("    track       Speed-coloured map track as JSON");
    println!("    series      Chart series of numeric fields against time");
    println!("    export      Export decoded records to CSV or Parquet");
    println!("    fields      List the record line columns");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>   Configuration file (TOML)");
    println!("    -v, --verbose         Increase logging verbosity");
    println!("    -q, --quiet           Suppress output except errors");
    println!("    -h, --help            Show help information");
    println!("    -V, --version         Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarise two rides:");
    println!("    telemetry-viewer inspect ride1.txt ride2.txt");
    println!();
    println!("    # Map track with a fixed 0-30 km/h colour scale:");
    println!("    telemetry-viewer track ride1.txt --palette green-red --speed-domain 0,30");
    println!();
    println!("    # Voltage and speed against time:");
    println!("    telemetry-viewer series ride1.txt -f voltage -f speed --format json");
    println!();
    println!("    # Export to Parquet:");
    println!("    telemetry-viewer export ride1.txt -o ride1.parquet --compression zstd");
    println!();
    println!("For detailed help on any command, use:");
    println!("    telemetry-viewer <COMMAND> --help");
}
