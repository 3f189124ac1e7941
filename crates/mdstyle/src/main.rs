//! mdstyle CLI - Markdown to styled HTML.
//!
//! Provides commands for:
//! - `render`: Render a file or stdin once
//! - `watch`: Re-render a file every time it changes
//! - `demo`: Render the built-in sample document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DemoArgs, RenderArgs, WatchArgs};
use error::CliError;
use output::Output;

/// mdstyle - Markdown to styled HTML.
#[derive(Parser)]
#[command(name = "mdstyle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown file (or stdin) once.
    Render(RenderArgs),
    /// Watch a Markdown file and re-render on change.
    Watch(WatchArgs),
    /// Render the built-in sample document.
    Demo(DemoArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Watch(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Watch(args) => tokio::runtime::Runtime::new()
            .map_err(CliError::from)
            .and_then(|rt| rt.block_on(args.execute())),
        Commands::Demo(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
