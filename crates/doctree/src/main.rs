//! `doctree` command line tool.
//!
//! `tree` prints the scanned content directory, `resolve` shows where a
//! single link on a page points, and `check` renders every page and lists
//! links that do not resolve.

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, GlobalArgs, ResolveArgs, TreeArgs};
use error::CliError;
use output::Output;

/// doctree - Document tree resolver.
#[derive(Parser)]
#[command(name = "doctree", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document tree.
    Tree(TreeArgs),
    /// Resolve a link from a page.
    Resolve(ResolveArgs),
    /// Check every page for unresolved links.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Output::new().fail(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `--verbose` forces debug; otherwise `RUST_LOG`, defaulting to warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Tree(args) => args.execute(&cli.global),
        Commands::Resolve(args) => args.execute(&cli.global),
        Commands::Check(args) => args.execute(&cli.global),
    }
}
