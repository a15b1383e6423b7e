mod action;
mod api;
mod app;
mod config;
mod event;
mod models;
mod tui;
mod ui;
mod utils;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::client::GameClient;
use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "game-cluster", version, about = "A terminal client for your game library")]
struct Cli {
    /// Base URL of the game library API (e.g. http://localhost:8080/api)
    #[arg(long, env = "GAME_CLUSTER_API_URL")]
    api_url: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "error")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = AppConfig::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    if cli.init_config {
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let client = Arc::new(GameClient::new(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )?);
    info!("Using game API at {}", client.base_url());

    let mut terminal = tui::init()?;

    let result = app::App::new(config, client).run(&mut terminal).await;
    tui::restore()?;

    result
}
