use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    init::{self, InitArgs},
    run::{self, RunArgs},
    status::{self, StatusArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "lcsk_run=info,lcsk_exp=info";

#[derive(Parser, Debug)]
#[command(name = "lcsk-run", version, about = "Resumable LCSk++ ratio experiment runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every pair missing from the ledger and append the results.
    Run(RunArgs),
    /// Report which pairs of the plan are recorded and which are pending.
    Status(StatusArgs),
    /// Create the ledger with its header row.
    Init(InitArgs),
    /// Print the crate version; `--long` adds git and rustc details as JSON.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Status(args) => status::run(&args),
        Command::Init(args) => init::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
