use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::fetch::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Scrape(ScrapeArgs),
    Parse(ParseArgs),
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Listing page URL (must be http/https).
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub url: String,

    /// Write the JSON result here instead of stdout.
    #[arg(long)]
    pub out: Option<String>,

    /// Also write a `;`-separated CSV of the exhibitions.
    #[arg(long)]
    pub csv: Option<String>,

    /// Request timeout for the listing fetch.
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub timeout_secs: u64,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Saved listing page HTML.
    #[arg(long)]
    pub html: String,

    /// URL the page was saved from; relative exhibition links resolve against it.
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub base_url: String,

    /// Write the JSON result here instead of stdout.
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Scrape result JSON (written by `scrape` or `parse`).
    #[arg(long)]
    pub input: String,

    /// Output file path.
    #[arg(long)]
    pub out: String,

    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Overwrite the output if it already exists.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}
