use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    fairscrape::logging::init().context("init logging")?;

    let cli = fairscrape::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        fairscrape::cli::Command::Scrape(args) => {
            fairscrape::scrape::run(args).await.context("scrape")?;
        }
        fairscrape::cli::Command::Parse(args) => {
            fairscrape::scrape::parse(args).context("parse")?;
        }
        fairscrape::cli::Command::Export(args) => {
            fairscrape::export::run(args).context("export")?;
        }
    }

    Ok(())
}
