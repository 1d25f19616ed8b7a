//! Chart Studio CLI
//!
//! Decodes extracted `.bin` charts and prints their events, timeline or summary.
//! Charts must be extracted from their `.ifs` archive first.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use chart_studio::commands::{
    display_schema, display_version, execute_parse, execute_serialize, execute_summarize,
    validate_summary_file, ChartArgs,
};
use chart_studio::parser::RecordFormat;

/// Chart Studio - chart decoding and summaries
#[derive(Parser, Debug)]
#[command(name = "chart-studio")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Chart input shared by the decoding commands
#[derive(Args, Debug)]
struct ChartInput {
    /// Path to an extracted .bin chart
    #[arg(short, long)]
    bin_file: PathBuf,

    /// Record format: 'new' (12-byte records) or 'old' (8-byte records)
    #[arg(short, long)]
    format: RecordFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl From<ChartInput> for ChartArgs {
    fn from(input: ChartInput) -> Self {
        Self {
            bin_file: input.bin_file,
            format: input.format,
            output: input.output,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every decoded event
    Parse {
        #[command(flatten)]
        input: ChartInput,

        /// Print a per-kind event breakdown
        #[arg(long)]
        stats: bool,
    },

    /// Print the timestamp-ordered timeline as CSV
    Serialize {
        #[command(flatten)]
        input: ChartInput,
    },

    /// Print the chart summary as JSON
    Summarize {
        #[command(flatten)]
        input: ChartInput,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a summary JSON file
    Validate {
        /// Path to summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Parse { input, stats } => {
            let args: ChartArgs = input.into();
            execute_parse(&args, stats)?;
        }

        Commands::Serialize { input } => {
            let args: ChartArgs = input.into();
            execute_serialize(&args)?;
        }

        Commands::Summarize { input, pretty } => {
            let args: ChartArgs = input.into();
            execute_summarize(&args, pretty)?;
        }

        Commands::Validate { file } => {
            validate_summary_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
