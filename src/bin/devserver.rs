//! Planner development server
//!
//! Run with: cargo run --bin studyplan-devserver
//!
//! Serves the planner REST API from memory. Data is lost on exit.
//!
//! # Configuration
//!
//! Read from the usual config file (`[server]` and `[logging]`), with
//! environment overrides:
//! - `STUDYPLAN_SERVER_HOST`: Host to bind to (default: 127.0.0.1)
//! - `STUDYPLAN_SERVER_PORT`: Port to listen on (default: 8000)
//! - `RUST_LOG`: Log filter (default: studyplan=info,tower_http=debug)

use clap::Parser;
use std::path::PathBuf;

use studyplan::config::Config;
use studyplan::server::{serve, AppState};

#[derive(Parser)]
#[command(name = "studyplan-devserver")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "In-memory planner backend for local development")]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    studyplan::logging::init(&config.logging, &["tower_http=debug"]);

    tracing::info!(
        "Starting planner dev server v{}",
        env!("CARGO_PKG_VERSION")
    );

    serve(AppState::new(), &config.server).await?;

    tracing::info!("Planner dev server stopped");
    Ok(())
}
