use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing::info;

use users::domain::service::{Service, ServiceConfig};
use users::infra::sankhya::SankhyaUsersRepository;

use crate::config::AppConfig;

mod config;
mod logging;

/// Vendas Server - sales-user management over the Sankhya data API
#[derive(Parser)]
#[command(name = "vendas-server")]
#[command(about = "Sales-user management over the Sankhya data API")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(cli.verbose);

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!("vendas-server starting");

    let client = Arc::new(sankhya::Client::new(config.sankhya.client_config()?));
    let repo = Arc::new(SankhyaUsersRepository::new(
        client,
        config.users.entity.clone(),
    ));
    let service = Arc::new(Service::new(
        repo,
        ServiceConfig {
            bcrypt_cost: config.users.bcrypt_cost,
        },
    ));

    let app = users::api::rest::router(service).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

fn check_config(config: AppConfig) -> Result<()> {
    // Surfaces a bad gateway URL before a deploy does.
    config.sankhya.client_config()?;
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
