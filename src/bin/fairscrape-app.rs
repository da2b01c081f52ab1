use std::net::SocketAddr;

use anyhow::Context as _;
use clap::Parser;

use fairscrape::app::{AppConfig, AppState, router};
use fairscrape::metrics::Metrics;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Listing page scraped by `GET /api/scrape` (env FAIRSCRAPE_SOURCE_URL wins).
    #[arg(long)]
    source_url: Option<String>,

    /// Fetch timeout in seconds (env FAIRSCRAPE_FETCH_TIMEOUT_SECS wins).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    fairscrape::logging::init()?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting fairscrape-app");

    let config = AppConfig::resolve(args.source_url.as_deref(), args.timeout_secs)
        .context("resolve app config")?;
    tracing::info!(
        source_url = %config.source_url,
        timeout_secs = config.fetch_timeout.as_secs(),
        "config"
    );

    let state = AppState::new(&config, Metrics::new()).context("build app state")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(?err, "install ctrl-c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
