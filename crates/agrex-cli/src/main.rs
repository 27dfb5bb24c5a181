mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Parser)]
#[command(
    name = "agrex",
    version,
    about = "Extraction tool for Agremo drone crop monitoring reports"
)]
struct Cli {
    /// Verbose logging (debug level) on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a structured record from an Agremo PDF report
    Extract {
        /// Path to the PDF report
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the extraction result to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Save the embedded map image into this directory
        #[arg(long = "save-map", value_name = "DIR")]
        save_map: Option<PathBuf>,

        /// Maximum input file size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "AGREX_MAX_FILE_SIZE")]
        max_file_size: u64,
    },
    /// Show what the extractor sees in a PDF without building a record
    Inspect {
        /// Path to the PDF report
        input_file: PathBuf,

        /// Maximum input file size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "AGREX_MAX_FILE_SIZE")]
        max_file_size: u64,
    },
    /// List the known stress level labels and their severities
    Levels,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            out,
            save_map,
            max_file_size,
        } => commands::extract::run(input_file, &output, out, save_map, max_file_size),
        Commands::Inspect {
            input_file,
            max_file_size,
        } => commands::inspect::run(input_file, max_file_size),
        Commands::Levels => commands::levels::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
