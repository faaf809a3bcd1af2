use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

use pbx_dashboard::api::PbxClient;
use pbx_dashboard::config::Config;
use pbx_dashboard::dashboard::Dashboard;
use pbx_dashboard::server;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Starting pbx-dashboard");

    let config = Config::load(&cli.secrets)?;
    let listen = cli.listen.unwrap_or(config.settings.listen);

    let client = PbxClient::new(config.credentials.clone()).context("Failed to build HTTP client")?;
    let dashboard = Arc::new(Dashboard::new(client, config.token_ttl()));

    server::serve(dashboard, listen)
        .await
        .with_context(|| format!("Dashboard server on {} failed", listen))?;

    Ok(())
}
