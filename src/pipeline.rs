use url::Url;

use crate::aggregate::{aggregate, collect_cities, date_range, dedup_venues};
use crate::classify::{extract_categories, normalize_frequency};
use crate::dates::parse_date_info;
use crate::error::ScrapeError;
use crate::extract::{RawPage, RawRow, extract_page, pair_venues};
use crate::fetch::Fetcher;
use crate::formats::{Exhibition, ScrapeResult};
use crate::metrics::Metrics;

/// Fetch, extract, normalize and aggregate one listing page.
///
/// Fetch failures abort the run; markup problems only shrink the result.
pub async fn scrape(
    fetcher: &Fetcher,
    url: &Url,
    metrics: &Metrics,
) -> Result<ScrapeResult, ScrapeError> {
    tracing::info!(%url, "scrape: fetch");
    let document = {
        let _timer = metrics.start("fetch");
        fetcher.fetch_document(url).await?
    };

    let result = scrape_html(&document.html, Some(&document.url), metrics);
    tracing::info!(
        %url,
        total = result.total,
        exhibitions = result.exhibitions.len(),
        venues = result.venues.len(),
        "scrape: done"
    );
    Ok(result)
}

/// Run the offline stages over an already fetched document.
pub fn scrape_html(html: &str, base_url: Option<&Url>, metrics: &Metrics) -> ScrapeResult {
    let page = {
        let _timer = metrics.start("extract");
        extract_page(html)
    };
    tracing::debug!(
        rows = page.rows.len(),
        caption_total = page.caption_total,
        "scrape: extracted"
    );

    let _timer = metrics.start("normalize");
    build_result(&page, base_url)
}

pub fn build_result(page: &RawPage, base_url: Option<&Url>) -> ScrapeResult {
    let exhibitions = page
        .rows
        .iter()
        .map(|row| normalize_row(row, base_url))
        .collect::<Vec<_>>();

    let venues = dedup_venues(exhibitions.iter().flat_map(|e| e.venues.iter()));
    let cities = collect_cities(&exhibitions);
    let date_range = date_range(&exhibitions);
    let statistics = aggregate(&exhibitions);

    ScrapeResult {
        total: page.caption_total,
        exhibitions,
        venues,
        cities,
        date_range,
        statistics,
    }
}

pub fn normalize_row(row: &RawRow, base_url: Option<&Url>) -> Exhibition {
    let href = row.href.as_deref().unwrap_or_default();
    let name = row.name.clone().unwrap_or_default();
    let description = row.description.clone().unwrap_or_default();
    let cycle = row.cycle.clone().unwrap_or_default();
    let date_text = row.date_text.as_deref().unwrap_or_default();

    let categories = extract_categories(&format!("{name} {description}"));
    let is_confirmed = !date_text.contains('?') && !date_text.contains("unknown");

    let exhibition = Exhibition {
        id: exhibition_id(href, row.index),
        link: absolute_link(href, base_url),
        venues: pair_venues(&row.anchors),
        date: parse_date_info(date_text),
        category: (!categories.is_empty()).then_some(categories),
        frequency: normalize_frequency(&cycle),
        exhibition_name: name,
        description,
        cycle,
        is_confirmed,
    };
    tracing::debug!(
        id = %exhibition.id,
        name = %exhibition.exhibition_name,
        venues = exhibition.venues.len(),
        "normalized row"
    );
    exhibition
}

/// Trailing `-<id>.html` segment of the listing href, else `ex-<row>`.
fn exhibition_id(href: &str, index: usize) -> String {
    let id = href
        .rsplit('-')
        .next()
        .and_then(|last| last.split('.').next())
        .unwrap_or_default();
    if id.is_empty() {
        format!("ex-{index}")
    } else {
        id.to_string()
    }
}

fn absolute_link(href: &str, base_url: Option<&Url>) -> String {
    if href.is_empty() {
        return String::new();
    }
    match base_url.map(|base| base.join(href)) {
        Some(Ok(url)) => url.to_string(),
        _ => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RawAnchor;
    use crate::formats::Frequency;

    fn base() -> Url {
        Url::parse("https://www.eventseye.com/fairs/c1_trade-shows_china.html").unwrap()
    }

    #[test]
    fn id_comes_from_trailing_href_segment() {
        assert_eq!(exhibition_id("f-canton-fair-1234.html", 0), "1234");
        assert_eq!(exhibition_id("", 7), "ex-7");
        assert_eq!(exhibition_id("f-broken-.html", 3), "ex-3");
    }

    #[test]
    fn link_is_resolved_against_page_url() {
        assert_eq!(
            absolute_link("f-canton-fair-1234.html", Some(&base())),
            "https://www.eventseye.com/fairs/f-canton-fair-1234.html"
        );
        assert_eq!(absolute_link("f-x-1.html", None), "f-x-1.html");
        assert_eq!(absolute_link("", Some(&base())), "");
    }

    #[test]
    fn row_normalization_fills_typed_fields() {
        let row = RawRow {
            index: 0,
            href: Some("f-ciie-china-international-import-expo-9876.html".to_string()),
            name: Some("CIIE".to_string()),
            description: Some("China International Import Expo - Food, Medical Equipment".to_string()),
            cycle: Some("once a year".to_string()),
            anchors: vec![
                RawAnchor {
                    text: "NECC".to_string(),
                    href: "pl1_trade-shows_necc_123.html".to_string(),
                },
                RawAnchor {
                    text: "Shanghai".to_string(),
                    href: "cy1_trade-shows-shanghai.html".to_string(),
                },
            ],
            date_text: Some("11/05/2024 6 days".to_string()),
        };

        let exhibition = normalize_row(&row, Some(&base()));
        assert_eq!(exhibition.id, "9876");
        assert_eq!(exhibition.frequency, Frequency::Annual);
        assert_eq!(exhibition.date.end, "11/10/2024");
        assert!(exhibition.is_confirmed);
        assert_eq!(
            exhibition.category,
            Some(vec![
                "Food".to_string(),
                "Machinery".to_string(),
                "Medical".to_string()
            ])
        );
        assert_eq!(exhibition.venues.len(), 1);
        assert_eq!(exhibition.venues[0].location, "Shanghai");
    }

    #[test]
    fn tentative_dates_are_not_confirmed() {
        for text in ["04/2025 ?", "dates unknown"] {
            let row = RawRow {
                date_text: Some(text.to_string()),
                ..RawRow::default()
            };
            let exhibition = normalize_row(&row, None);
            assert!(!exhibition.is_confirmed, "{text}");
            assert_eq!(exhibition.category, None);
            assert_eq!(exhibition.id, "ex-0");
        }
    }

    #[test]
    fn missing_table_yields_empty_result() {
        let metrics = Metrics::new();
        let result = scrape_html("<html><body></body></html>", None, &metrics);
        assert_eq!(result, ScrapeResult::default());
        assert_eq!(metrics.sample_count("extract"), 1);
    }
}
