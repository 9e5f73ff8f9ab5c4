use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use gossip_app::{RemoteGossipPage, fetch_and_save};
use gossip_common::observability::{LogConfig, init_logging};
use gossip_config::{GossipConfig, GossipConfigLoader};
use gossip_store::RawStore;
use std::path::PathBuf;
use tracing::{error, info};

const APP_NAME: &str = "gossip-fetch";

#[derive(Parser, Debug)]
#[clap(
    name = "gossip-fetch",
    version,
    about = "Store the html from the football gossip page locally"
)]
struct Cli {
    #[clap(long, short, default_value = "gossip.yaml", help = "Configuration file (optional)")]
    config: PathBuf,
}

/// Scheduled entry point: every failure is logged and the process still exits 0.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let cfg = GossipConfigLoader::new()
        .with_optional_file(&cli.config)
        .load();
    let log_config = match &cfg {
        Ok(cfg) => cfg.log.to_log_config(APP_NAME),
        Err(_) => LogConfig {
            app_name: APP_NAME,
            ..LogConfig::default()
        },
    };
    if let Err(err) = init_logging(log_config) {
        eprintln!("{APP_NAME}: logging unavailable: {err:#}");
    }

    info!("START");
    match cfg {
        Ok(cfg) => {
            if let Err(err) = run(&cfg).await {
                error!(error = %format!("{err:#}"), "gossip.fetch.failed");
            }
        }
        Err(err) => error!(error = %err, "gossip.fetch.config_failed"),
    }
    info!("END");
}

async fn run(cfg: &GossipConfig) -> Result<()> {
    let fetcher = RemoteGossipPage::from_config(&cfg.remote)?;
    let store = RawStore::new(cfg.data.raw_dir());
    let path = fetch_and_save(&fetcher, &store, Utc::now()).await?;
    info!(path = %path.display(), "gossip.fetch.saved");
    Ok(())
}
