//! Email Service - REST API over a local SQLite inbox

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use email_service::{web, Database, EmailStore, ServiceConfig};

#[derive(Parser)]
#[command(name = "email-service")]
#[command(about = "Local email inbox with a REST API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: .email-service.toml, searched upwards from cwd)
    #[arg(long, env = "EMAIL_SERVICE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(long, short)]
        port: Option<u16>,
    },
    /// Reset the database to the seed emails
    Reset,
    /// Print stored emails as JSON
    List {
        /// Only unread emails
        #[arg(long)]
        unread: bool,
    },
}

fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = ServiceConfig::load_from_path(path)?;
            config.apply_overrides(|key| std::env::var(key).ok())?;
            config
        }
        None => ServiceConfig::load()?,
    };

    if let Some(db) = &cli.db {
        config.database.path = db.clone();
    }

    Ok(config)
}

fn open_store(config: &ServiceConfig) -> Result<EmailStore> {
    let db = Database::open_at(&config.database.path)?;
    Ok(EmailStore::new(db, config.mailbox.self_address.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    mcp_common::init_tracing("email_service", cli.verbose)?;

    let mut config = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let store = open_store(&config)?;
            if config.database.seed_on_startup {
                store.seed_missing().context("Failed to seed database")?;
            }

            web::serve(&config.server, store).await?;
        }
        Commands::Reset => {
            let store = open_store(&config)?;
            let response = store.reset().context("Failed to reset database")?;
            println!("{}", response.message);
        }
        Commands::List { unread } => {
            let store = open_store(&config)?;
            let emails = if unread {
                store.list_unread()
            } else {
                store.list_all()
            }
            .context("Failed to list emails")?;
            println!("{}", serde_json::to_string_pretty(&emails)?);
        }
    }

    Ok(())
}
