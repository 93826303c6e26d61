mod backend;
mod config;
mod error;
mod web;

use crate::backend::state::AppState;
use crate::config::ServerConfig;
use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "person-web",
    about = "Person records: save, look up, edit, delete and list through HTML forms"
)]
struct Args {
    /// TOML config file (bind, state_file, in_memory, seed_on_start)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "PERSON_WEB_BIND")]
    bind: Option<SocketAddr>,

    /// JSON file the person table is persisted to
    #[arg(long, conflicts_with = "in_memory")]
    state_file: Option<PathBuf>,

    /// Keep records in memory only
    #[arg(long)]
    in_memory: bool,

    /// Save the test record at startup
    #[arg(long)]
    seed: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "person_web=info")]
    log_level: String,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(path) = &self.state_file {
            config.state_file = Some(path.clone());
            config.in_memory = false;
        }
        if self.in_memory {
            config.in_memory = true;
            config.state_file = None;
        }
        if self.seed {
            config.seed_on_start = true;
        }
        Ok(config)
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = args.resolve_config()?;
    let state = Arc::new(
        AppState::new(config.state_file.clone()).context("failed to open person state")?,
    );
    if config.seed_on_start {
        state.service.seed_test()?;
        state.persist()?;
    }

    let app = web::router(state.clone());
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        addr = %config.bind,
        state_file = ?config.state_file,
        "person-web listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.persist().context("failed to write final snapshot")?;
    Ok(())
}
