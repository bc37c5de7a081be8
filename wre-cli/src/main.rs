//! WRE CLI - Command line tool for exploring water resources datasets.

use clap::Parser;
use std::path::PathBuf;
use wre_explorer::ExplorerConfig;

#[derive(Parser)]
#[command(
    name = "wre-cli",
    version,
    about = "Water resources dataset explorer toolkit"
)]
struct Cli {
    /// JSON explorer config; built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config
    #[arg(long, global = true, env = "WRE_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: wre_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ExplorerConfig::from_file(path)?,
        None => ExplorerConfig::default(),
    };
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    log::debug!("Backend at {}", config.api_url);

    wre_cmd::run(cli.command, config).await
}
