use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use gossip_app::{RemoteGossipPage, render_digest, requested_date, resolve_page};
use gossip_common::TimeOfDay;
use gossip_common::observability::init_logging;
use gossip_config::GossipConfigLoader;
use gossip_store::RawStore;
use gossip_web::GossipPage;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(
    name = "gossip",
    version,
    about = "Print the football gossip digest for a day"
)]
struct Cli {
    #[clap(long, short, default_value = "gossip.yaml", help = "Configuration file (optional)")]
    config: PathBuf,

    #[clap(long, short, help = "Year, defaults to the current year")]
    year: Option<i32>,

    #[clap(long, short, help = "Month, defaults to the current month")]
    month: Option<u32>,

    #[clap(long, short, help = "Day of month, defaults to today")]
    day: Option<u32>,

    #[clap(
        long,
        short,
        help = "Time of day bucket: am or pm (default: latest available)"
    )]
    tod: Option<TimeOfDay>,

    #[clap(long, short, help = "Print the unparsed HTML")]
    raw: bool,

    #[clap(long, help = "Print only the story container's HTML")]
    story_html: bool,

    #[clap(long, help = "Do not mark bold terms")]
    plain: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gossip: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = GossipConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()?;
    init_logging(cfg.log.to_log_config("gossip"))?;

    let today = Utc::now().date_naive();
    let date = requested_date(cli.year, cli.month, cli.day, today)?;

    let store = RawStore::new(cfg.data.raw_dir());
    let fetcher = RemoteGossipPage::from_config(&cfg.remote)?;
    let resolved = resolve_page(&store, &fetcher, date, cli.tod, today).await?;
    info!(%date, origin = ?resolved.origin, length = resolved.html.len(), "gossip.resolved");

    let container_id = cfg.page.story_container_id.as_str();
    if cli.raw {
        println!("{}", resolved.html);
    } else if cli.story_html {
        println!("{}", GossipPage::parse(&resolved.html).story_html(container_id)?);
    } else {
        for entry in render_digest(&resolved.html, container_id, !cli.plain)? {
            println!("{entry}\n");
        }
    }
    Ok(())
}
