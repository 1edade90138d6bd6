//! confmark CLI - publish markdown to Confluence.
//!
//! Provides commands for:
//! - `convert`: Convert markdown to Confluence storage format
//! - `publish`: Create or update a Confluence page from markdown

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, PublishArgs};
use error::CliError;
use output::Output;

/// confmark - markdown to Confluence publisher.
#[derive(Parser)]
#[command(name = "confmark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to Confluence storage format.
    Convert(ConvertArgs),
    /// Create or update a Confluence page from markdown.
    Publish(PublishArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set for publish command
    let verbose = matches!(&cli.command, Commands::Publish(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Publish(args) => args.execute(),
    };

    if let Err(err) = result {
        report(&output, &err);
        std::process::exit(1);
    }
}

fn report(output: &Output, err: &CliError) {
    output.error(&format!("Error: {err}"));
    if let Some(confluence) = err.confluence() {
        output.remediation(confluence.code(), confluence.remediation());
    }
}
