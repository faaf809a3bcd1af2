use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use pbx_dashboard::config::DEFAULT_SECRETS_PATH;

#[derive(Parser)]
#[command(name = "pbx-dashboard")]
#[command(about = "Web dashboard for Yeastar PBX system information and extensions")]
#[command(version)]
pub struct Cli {
    /// Secrets file holding BASE_URL, USERNAME and PASSWORD
    #[arg(long, default_value = DEFAULT_SECRETS_PATH)]
    pub secrets: PathBuf,

    /// Address to serve the dashboard on (overrides settings.listen)
    #[arg(long)]
    pub listen: Option<SocketAddr>,
}
