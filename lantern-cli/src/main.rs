//! Lantern CLI - private article retrieval server
//!
//! This is the entry point for operating a Lantern deployment. It can
//! serve a corpus directory over TCP or inspect one without serving.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "lantern")]
#[command(author = "Lantern Contributors")]
#[command(version)]
#[command(about = "Private article retrieval server", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve a corpus directory
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8889")]
        port: u16,

        /// Seconds between corpus refreshes
        #[arg(long, default_value = "60")]
        interval: u64,

        /// Corpus directory holding manifest.json (defaults to current directory)
        #[arg(default_value = ".")]
        corpus: PathBuf,
    },

    /// Inspect a corpus without serving it
    Status {
        /// Corpus directory to check (defaults to current directory)
        #[arg(default_value = ".")]
        corpus: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Serve {
            host,
            port,
            interval,
            corpus,
        } => commands::serve(&host, port, interval, &corpus).await,
        Commands::Status { corpus } => commands::status(&corpus),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
