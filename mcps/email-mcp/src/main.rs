//! Email MCP Server
//!
//! Serves the email tools over stdio by default. The other subcommands run a
//! single tool in-process or print the assistant prompt.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rmcp::{transport::io::stdio, ServiceExt};
use serde_json::Value;

use email_mcp::{build_prompt, display, AdapterConfig, Email, EmailMcpServer, EmbeddableMcp};

#[derive(Parser)]
#[command(name = "email-mcp")]
#[command(about = "Email inbox tools for LLM agents")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Email service base URL
    #[arg(long, env = "EMAIL_SERVICE_URL", global = true)]
    service_url: Option<String>,

    /// Your own address, used in the assistant prompt
    #[arg(long, env = "EMAIL_SELF_ADDRESS", global = true)]
    self_address: Option<String>,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// List available tools
    Tools,
    /// Call a tool directly
    Call {
        /// Tool name
        tool: String,
        /// Arguments as JSON
        #[arg(long, short)]
        args: Option<String>,
        /// Print a tool trace instead of the raw result
        #[arg(long)]
        trace: bool,
        /// Print email lists as a summary table
        #[arg(long)]
        summary: bool,
    },
    /// Print the assistant prompt for a request
    Prompt {
        /// Natural-language request
        request: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    mcp_common::init_tracing("email_mcp", cli.verbose)?;

    let mut config = AdapterConfig::from_env();
    if let Some(url) = cli.service_url {
        config.service_url = url;
    }
    if let Some(address) = cli.self_address {
        config.self_address = address;
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&config).await,
        Commands::Tools => {
            let server = EmailMcpServer::new(&config)?;
            for tool in server.list_tools() {
                println!("{:<28} {}", tool.name, tool.description.unwrap_or_default());
            }
            Ok(())
        }
        Commands::Call {
            tool,
            args,
            trace,
            summary,
        } => call(&config, &tool, args.as_deref(), trace, summary).await,
        Commands::Prompt { request } => {
            display::print_banner("Prompt", &build_prompt(&request, &config.self_address));
            Ok(())
        }
    }
}

async fn serve(config: &AdapterConfig) -> Result<()> {
    tracing::info!("Starting Email MCP server (service: {})", config.service_url);

    let server = EmailMcpServer::new(config)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Email MCP server running");

    service.waiting().await?;

    tracing::info!("Email MCP server stopped");

    Ok(())
}

async fn call(
    config: &AdapterConfig,
    tool: &str,
    args: Option<&str>,
    trace: bool,
    summary: bool,
) -> Result<()> {
    let args: Value = match args {
        Some(raw) => serde_json::from_str(raw).context("--args must be a JSON object")?,
        None => Value::Object(Default::default()),
    };

    let server = EmailMcpServer::new(config)?;
    let result = server.call_tool(tool, args.clone()).await?;
    let text = mcp_common::first_text(&result).unwrap_or_default();

    if summary {
        if let Ok(emails) = serde_json::from_str::<Vec<Email>>(text) {
            display::print_email_summary(&emails);
            return Ok(());
        }
    }

    if trace {
        let value = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        display::print_tool_trace(tool, &args, &value);
    } else {
        println!("{}", text);
    }

    Ok(())
}
