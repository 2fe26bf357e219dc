//! `evateam tools`: inspect and call MCP tools directly.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use serde_json::{Value, json};

use evateam_mcp::default_registry;

use super::Context;

/// Tool commands.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    #[command(subcommand)]
    pub command: Option<ToolsCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommand {
    /// List tool definitions (the default)
    List,

    /// Call one tool with JSON arguments
    Call(CallArgs),
}

/// Arguments for `evateam tools call`.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name, e.g. `eva_task_get`
    pub name: String,

    /// Arguments as a JSON object
    #[arg(default_value = "{}")]
    pub arguments: String,
}

/// Run the tools command.
pub async fn run(args: ToolsArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(ToolsCommand::List) {
        ToolsCommand::List => run_list(ctx),
        ToolsCommand::Call(call) => run_call(call, ctx).await,
    }
}

fn run_list(ctx: &Context) -> Result<()> {
    let registry = default_registry(ctx.client()?);
    let definitions = registry.definitions();

    if ctx.verbose {
        return ctx.print_json(&serde_json::to_value(&definitions)?);
    }
    let summary: Vec<Value> = definitions
        .iter()
        .map(|d| json!({"name": d.name, "description": d.description}))
        .collect();
    ctx.print_json(&Value::Array(summary))
}

async fn run_call(args: CallArgs, ctx: &Context) -> Result<()> {
    let params: Value = serde_json::from_str(&args.arguments)
        .with_context(|| format!("arguments are not valid JSON: {}", args.arguments))?;

    let registry = default_registry(ctx.client()?);
    match registry.execute(&args.name, params).await {
        Ok(result) => {
            println!("{}", result.to_text());
            Ok(())
        }
        Err(e) => {
            tracing::debug!(error = %e, "tool call failed");
            anyhow::bail!(e.user_message())
        }
    }
}
