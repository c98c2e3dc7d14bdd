use anyhow::Result;
use clap::{Parser, Subcommand};
use shardframe_cli::commands;
use shardframe_cli::{InputFormat, StoreOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "shardframe")]
#[command(about = "Shardframe - Length-prefixed frame buffers with a bucket index", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack JSON payloads into a frame buffer
    Pack {
        /// Input JSON file, or - for stdin
        #[arg(short, long)]
        input: String,

        /// Output file for the packed buffer
        #[arg(short, long)]
        output: String,

        /// How the input is split into payloads
        #[arg(long, value_enum, default_value = "json")]
        format: InputFormat,

        #[command(flatten)]
        store: StoreOptions,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Rebuild the bucket index of a packed buffer and summarize it
    Inspect {
        /// Packed buffer file
        #[arg(short, long)]
        input: String,

        /// Frames per bucket for the rebuilt index
        #[arg(long, default_value = "64")]
        bucket_size: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print frames from a packed buffer
    Get {
        /// Packed buffer file
        #[arg(short, long)]
        input: String,

        /// Index of the first frame
        #[arg(long)]
        index: usize,

        /// Number of frames to print
        #[arg(long, default_value = "1")]
        count: usize,

        /// Frames per bucket for the rebuilt index
        #[arg(long, default_value = "64")]
        bucket_size: u32,

        /// Print payloads as hex instead of text
        #[arg(long)]
        hex: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Pack {
            input,
            output,
            format,
            store,
            progress,
        } => commands::pack::execute(&input, &output, format, &store, progress).map(|_| ()),

        Commands::Inspect {
            input,
            bucket_size,
            json,
        } => commands::inspect::execute(&input, bucket_size, json).map(|_| ()),

        Commands::Get {
            input,
            index,
            count,
            bucket_size,
            hex,
        } => commands::get::execute(&input, bucket_size, index, count, hex).map(|_| ()),
    }
}
