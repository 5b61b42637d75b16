//! Shelf CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: merge `--config`, flags and environment into a
//!    [`shelf_client::ShelfConfig`] and an [`HttpTransportConfig`].
//! 2. **Wire observability**: install the `tracing-subscriber` formatter on
//!    stderr, plain or JSON. Library crates only emit spans and events.
//! 3. **Construct infrastructure**: build the [`ReqwestTransport`] and inject
//!    it into a [`ShelfClient`].
//! 4. **Run the subcommand** inside a root span tagged with a per-run id.

mod args;
mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use shelf_client::ShelfClient;
use shelf_transport::{HttpTransportConfig, ReqwestTransport};
use tracing::Instrument;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::args::Cli;
use crate::config::FileConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("shelf", %run_id);
    run(cli).instrument(span).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let resolved = config::resolve(cli.host, cli.token, file)?;
    tracing::debug!(
        host = ?resolved.shelf.host.as_ref().map(|h| h.as_str()),
        "Configuration resolved"
    );

    let transport = build_transport(&resolved.transport)?;
    let client = ShelfClient::new(resolved.shelf, transport);

    commands::run(&client, cli.command).await
}

fn build_transport(config: &HttpTransportConfig) -> anyhow::Result<ReqwestTransport> {
    ReqwestTransport::new(config).context("failed to build HTTP transport")
}

/// `RUST_LOG` wins; otherwise `-v` selects debug and the default is warn.
fn init_tracing(verbose: bool, json: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
