use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use url::Url;

use crate::cli::{ExportFormat, ParseArgs, ScrapeArgs};
use crate::fetch::Fetcher;
use crate::formats::ScrapeResult;
use crate::metrics::Metrics;

pub async fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let url = Url::parse(&args.url).context("parse --url")?;
    ensure_outputs_free([args.out.as_deref(), args.csv.as_deref()])?;
    let fetcher =
        Fetcher::new(Duration::from_secs(args.timeout_secs)).context("build http client")?;
    let metrics = Metrics::new();

    let result = crate::pipeline::scrape(&fetcher, &url, &metrics)
        .await
        .with_context(|| format!("scrape {url}"))?;
    tracing::debug!(timings_ms = ?metrics.snapshot(), "scrape timings");

    write_json(&result, args.out.as_deref())?;
    if let Some(csv) = args.csv.as_deref() {
        crate::export::write_result(&result, Path::new(csv), ExportFormat::Csv, false)
            .context("write csv")?;
    }
    Ok(())
}

/// Every requested output must be absent before anything is fetched or written.
fn ensure_outputs_free<'a>(
    outputs: impl IntoIterator<Item = Option<&'a str>>,
) -> anyhow::Result<()> {
    let outputs = outputs.into_iter().flatten().collect::<Vec<_>>();
    for (i, out) in outputs.iter().enumerate() {
        if Path::new(out).exists() {
            anyhow::bail!("output already exists: {out}");
        }
        if outputs[..i].contains(out) {
            anyhow::bail!("--out and --csv must differ: {out}");
        }
    }
    Ok(())
}

pub fn parse(args: ParseArgs) -> anyhow::Result<()> {
    let base_url = Url::parse(&args.base_url).context("parse --base-url")?;
    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("read html: {}", args.html))?;

    let metrics = Metrics::new();
    let result = crate::pipeline::scrape_html(&html, Some(&base_url), &metrics);
    tracing::info!(
        total = result.total,
        exhibitions = result.exhibitions.len(),
        "parsed saved page"
    );

    write_json(&result, args.out.as_deref())
}

fn write_json(result: &ScrapeResult, out: Option<&str>) -> anyhow::Result<()> {
    let Some(out) = out else {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer_pretty(&mut lock, result).context("serialize scrape result")?;
        lock.write_all(b"\n").context("write stdout newline")?;
        return Ok(());
    };

    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(out)
        .with_context(|| format!("create output: {out}"))?;
    serde_json::to_writer_pretty(&mut file, result).context("serialize scrape result")?;
    file.write_all(b"\n").context("write output newline")?;
    file.flush().with_context(|| format!("flush output: {out}"))?;
    Ok(())
}
