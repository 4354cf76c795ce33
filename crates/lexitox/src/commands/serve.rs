//! Serve command: run the MCP server on stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use lexitox_core::Config;

use super::load_analyzer;
use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    // Transport is always stdio
}

/// Load the dictionaries once and serve MCP requests until stdin closes.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    let analyzer = load_analyzer(&config, None);
    info!(
        toxicity_enabled = analyzer.toxicity_enabled(),
        phrases = analyzer.dictionary().len(),
        stopwords = analyzer.stopwords().len(),
        "starting MCP server on stdio"
    );

    let service = ProjectServer::new(analyzer, max_input_bytes)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service
        .waiting()
        .await
        .context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
