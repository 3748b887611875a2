//! durapool CLI - Command-line interface for durable pools

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "durapool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Pool connection URI, e.g. lmdb://jobs?dsn=./jobs.mdb
    #[arg(short, long)]
    uri: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push an item onto the tail of the pool
    Push {
        /// Value to push (text unless --int or --base64 is given)
        value: String,

        /// Push the value as an integer
        #[arg(long, conflicts_with = "base64")]
        int: bool,

        /// Value is base64-encoded raw bytes
        #[arg(long)]
        base64: bool,
    },

    /// Pop the oldest item and print it
    Pop,

    /// Print the number of items in the pool
    Len,

    /// Pop and print items until the pool is empty
    Drain {
        /// Stop after this many items
        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// Show bucket, length and sequence information (LMDB pools only)
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Push { value, int, base64 } => {
            commands::queue::push(&cli.uri, &value, int, base64)?;
        }
        Commands::Pop => {
            commands::queue::pop(&cli.uri)?;
        }
        Commands::Len => {
            commands::queue::len(&cli.uri)?;
        }
        Commands::Drain { limit } => {
            commands::queue::drain(&cli.uri, limit)?;
        }
        Commands::Status => {
            commands::status::execute(&cli.uri)?;
        }
    }

    Ok(())
}
