//! metacheck entry point.
//!
//! Check a batch of fragments:
//! ```bash
//! cargo run -p metacheck-cli -- check fragments.json
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*};

use metacheck_cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(metacheck_cli::log_filter(cli.verbose)?)
        .init();

    let clean = metacheck_cli::run(&cli, &mut std::io::stdout().lock())?;
    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
