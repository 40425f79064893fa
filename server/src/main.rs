//! `heroes` binary: runs the API service or loads sample data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use heroes_core::AppConfig;
use heroes_db::{seed, Database};
use heroes_server::{init_tracing, serve, AppState};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;

/// Superheroes directory service.
#[derive(Parser, Debug)]
#[command(name = "heroes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "HEROES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Run the HTTP API (default)
    #[default]
    Serve,
    /// Replace every record with the sample superheroes
    Seed,
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            config.apply_env(|key| std::env::var(key).ok())?;
            config
        }
        None => AppConfig::load_with_env()?,
    };
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn run_serve(config: &AppConfig, db: Database) -> Result<()> {
    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let state = AppState::new(db);
    let result = serve(listener, state.clone(), shutdown_signal()).await;
    state.db.close().await;
    result.context("server error")
}

async fn run_seed(db: Database) -> Result<()> {
    let created = seed::seed(db.pool(), &seed::sample_superheroes())
        .await
        .context("failed to seed database")?;
    info!("Database seeding completed ({} records)", created.len());
    db.close().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    info!("Starting heroes v{}", env!("CARGO_PKG_VERSION"));

    let db = Database::from_config(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    db.run_migrations().await.context("failed to migrate database")?;

    match cli.command.unwrap_or_default() {
        Commands::Serve => run_serve(&config, db).await,
        Commands::Seed => run_seed(db).await,
    }
}
