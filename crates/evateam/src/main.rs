//! EVA Team command-line client.
//!
//! Main entry point for the `evateam` CLI.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{query, serve, tools};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// EVA Team API client and MCP server
#[derive(Parser)]
#[command(name = "evateam")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    pub compact: bool,

    /// API base URL
    #[arg(long, global = true, env = "EVA_API_URL")]
    pub url: Option<String>,

    /// API token
    #[arg(long, global = true, env = "EVA_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "EVA_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Log every request and response
    #[arg(
        long,
        global = true,
        env = "EVA_DEBUG",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a list query against one entity
    Query(query::QueryArgs),

    /// List or call MCP tools
    Tools(tools::ToolsArgs),

    /// Serve MCP tools over stdio
    Serve(serve::ServeArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries command output and the MCP stream, so logs go to stderr
    let filter = if cli.verbose || cli.debug {
        "evateam=debug,evateam_client=debug,evateam_mcp=debug,info"
    } else {
        "evateam=info,evateam_client=info,evateam_mcp=info,warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();

    let ctx = commands::Context {
        url: cli.url,
        token: cli.token,
        timeout: Duration::from_secs(cli.timeout),
        debug: cli.debug,
        compact: cli.compact,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Query(args) => query::run(args, &ctx).await,
        Commands::Tools(args) => tools::run(args, &ctx).await,
        Commands::Serve(args) => serve::run(args, &ctx).await,
    }
}
