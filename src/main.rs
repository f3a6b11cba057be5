// ============================================================
// refspan - find and parse reference spans in policy documents
// ============================================================

mod application;
mod cli;
mod data;
mod domain;
mod infra;
mod labelling;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> Result<()> {
    // RUST_LOG overrides the default level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("refspan=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Cli::parse().run()
}
