//! memvcs smoke test entry point.
//!
//! ```bash
//! cargo run -p memvcs-smoke -- --porcelain
//! ```

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use clap::Parser;
use memvcs_smoke::{Cli, SmokeConfig};

fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let config = SmokeConfig::from(Cli::parse());
    tracing::debug!(?config, "starting smoke run");

    let stdout = std::io::stdout();
    memvcs_smoke::run(&config, &mut stdout.lock())?;
    Ok(())
}
