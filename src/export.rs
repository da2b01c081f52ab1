use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Context as _;

use crate::cli::{ExportArgs, ExportFormat};
use crate::formats::{Exhibition, ScrapeResult};

const CSV_HEADER: [&str; 7] = [
    "name",
    "frequency",
    "venues",
    "start",
    "end",
    "description",
    "date",
];

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read scrape result: {}", args.input))?;
    let result: ScrapeResult =
        serde_json::from_str(&contents).context("parse scrape result json")?;

    write_result(&result, Path::new(&args.out), args.format, args.force)
}

pub fn write_result(
    result: &ScrapeResult,
    out: &Path,
    format: ExportFormat,
    force: bool,
) -> anyhow::Result<()> {
    if out.exists() && !force {
        anyhow::bail!("export output already exists: {}", out.display());
    }
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export output dir: {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let mut file = options
        .open(out)
        .with_context(|| format!("open output: {}", out.display()))?;

    tracing::info!(?format, out = %out.display(), exhibitions = result.exhibitions.len(), "export");
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut file, result).context("serialize scrape result")?;
            file.write_all(b"\n").context("write trailing newline")?;
        }
        ExportFormat::Csv => write_csv(&mut file, &result.exhibitions)?,
    }
    file.flush()
        .with_context(|| format!("flush output: {}", out.display()))?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, exhibitions: &[Exhibition]) -> anyhow::Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);
    csv.write_record(CSV_HEADER).context("write csv header")?;

    for exhibition in exhibitions {
        let venues = exhibition
            .venues
            .iter()
            .map(|v| match (v.name.is_empty(), v.location.is_empty()) {
                (false, false) => format!("{} ({})", v.name, v.location),
                (false, true) => v.name.clone(),
                _ => v.location.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");

        csv.write_record([
            exhibition.exhibition_name.as_str(),
            exhibition.frequency.as_str(),
            venues.as_str(),
            exhibition.date.start.as_str(),
            exhibition.date.end.as_str(),
            exhibition.description.as_str(),
            exhibition.date.raw.as_str(),
        ])
        .with_context(|| format!("write csv row: {}", exhibition.id))?;
    }

    csv.flush().context("flush csv")?;
    Ok(())
}
