//! `evateam serve`: MCP server over stdio.

use anyhow::Result;
use clap::Args;
use tokio::io::BufReader;

use evateam_mcp::{McpServer, default_registry};

use super::Context;

/// Arguments for `evateam serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {}

/// Run the MCP server until stdin closes.
pub async fn run(_args: ServeArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    tracing::info!(endpoint = %client.endpoint(), "serving EVA Team tools");

    let server = McpServer::new(default_registry(client));
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}
