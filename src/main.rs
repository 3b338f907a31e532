//! Headless simulation runner (default binary).
//!
//! Plays one game with an automated agent and prints the report as JSON on
//! stdout. Diagnostics go to stderr through `tracing`; set `RUST_LOG` to
//! change the level (default `warn`).

mod cli;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use grid_tetris::engine::run_simulation;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = cli::parse_simulate_args(&args)?.ok_or_else(|| anyhow!(cli::USAGE))?;
    tracing::debug!(?config, "starting simulation");

    let report = run_simulation(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
