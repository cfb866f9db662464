//! # wraplint CLI entry point
//!
//! Parses command-line arguments, initializes logging on stderr, and runs
//! the lint.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wraplint_cli::validate::{run_validate, ValidateArgs};
use wraplint_cli::EXIT_CONFIG_ERROR;

/// Lint market wrap day documents against the schema contract and the
/// editorial, consistency and realism rules.
#[derive(Parser, Debug)]
#[command(name = "wraplint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,

    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "wraplint starting");

    match run_validate(&cli.args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}
