//! Markup-coupled extraction of listing rows.
//!
//! Every selector and URL-path convention of the listing source lives in this
//! module. Upstream markup changes should only ever touch this file; the rest
//! of the pipeline consumes [`RawPage`] / [`RawRow`].

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::formats::Venue;

/// Venue anchors point at `pl1_trade-shows_<slug>_<id>.html`.
pub const VENUE_PATH_MARKER: &str = "pl1_trade-shows_";
/// City anchors point at `cy1_trade-shows-<city>.html`.
pub const CITY_PATH_MARKER: &str = "cy1_trade-shows-";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|err| panic!("invalid selector '{css}': {err}"))
}

static SEL_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.tradeshows"));
static SEL_CAPTION: LazyLock<Selector> = LazyLock::new(|| selector("caption"));
static SEL_ROW: LazyLock<Selector> = LazyLock::new(|| selector("tbody > tr"));
static SEL_FIRST_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td:first-child"));
static SEL_CYCLE_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td:nth-child(2)"));
static SEL_VENUE_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td:nth-child(3)"));
static SEL_LAST_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td:last-child"));
static SEL_ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static SEL_BOLD: LazyLock<Selector> = LazyLock::new(|| selector("b"));
static SEL_ITALIC: LazyLock<Selector> = LazyLock::new(|| selector("i"));

static RE_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+Trade Shows").expect("invalid regex: caption total")
});

/// One table row, before normalization.
///
/// `None` means the element was absent from the markup; `Some("")` means it
/// was present but had no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub index: usize,
    pub href: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub cycle: Option<String>,
    pub anchors: Vec<RawAnchor>,
    pub date_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAnchor {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Venue,
    City,
    Other,
}

impl RawAnchor {
    pub fn kind(&self) -> AnchorKind {
        if self.href.contains(VENUE_PATH_MARKER) {
            AnchorKind::Venue
        } else if self.href.contains(CITY_PATH_MARKER) {
            AnchorKind::City
        } else {
            AnchorKind::Other
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPage {
    /// Advisory count from the table caption; never checked against `rows`.
    pub caption_total: usize,
    pub rows: Vec<RawRow>,
}

pub fn extract_rows(html: &str) -> Vec<RawRow> {
    extract_page(html).rows
}

/// Parse the listing table. A page without the table yields an empty page.
pub fn extract_page(html: &str) -> RawPage {
    let document = Html::parse_document(html);
    let Some(table) = document.select(&SEL_TABLE).next() else {
        tracing::debug!("listing table not found");
        return RawPage::default();
    };

    let caption_total = table
        .select(&SEL_CAPTION)
        .next()
        .map(|caption| parse_caption_total(&element_text(caption)))
        .unwrap_or(0);

    let rows = table
        .select(&SEL_ROW)
        .enumerate()
        .map(|(index, row)| extract_row(index, row))
        .collect::<Vec<_>>();

    RawPage {
        caption_total,
        rows,
    }
}

fn parse_caption_total(caption: &str) -> usize {
    RE_TOTAL
        .captures(caption)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn extract_row(index: usize, row: ElementRef<'_>) -> RawRow {
    let anchor = row
        .select(&SEL_FIRST_CELL)
        .next()
        .and_then(|cell| cell.select(&SEL_ANCHOR).next());

    let name = anchor.and_then(|a| joined_text(a, &SEL_BOLD));
    let description = anchor.and_then(|a| joined_text(a, &SEL_ITALIC));
    let href = anchor
        .and_then(|a| a.value().attr("href"))
        .map(|h| h.trim().to_string());

    let cycle = row.select(&SEL_CYCLE_CELL).next().map(element_text);
    let date_text = row.select(&SEL_LAST_CELL).next().map(element_text);

    let anchors = row
        .select(&SEL_VENUE_CELL)
        .next()
        .map(|cell| {
            cell.select(&SEL_ANCHOR)
                .map(|a| RawAnchor {
                    text: element_text(a),
                    href: a.value().attr("href").unwrap_or_default().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    RawRow {
        index,
        href,
        name,
        description,
        cycle,
        anchors,
        date_text,
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn joined_text(element: ElementRef<'_>, sel: &Selector) -> Option<String> {
    let mut found = false;
    let mut out = String::new();
    for child in element.select(sel) {
        found = true;
        out.extend(child.text());
    }
    found.then(|| out.trim().to_string())
}

/// Pair the venue and city anchors of one row into location units.
///
/// A venue waits for the next city. A second venue flushes the first without
/// a city, a city with no pending venue becomes a nameless venue, and a
/// trailing venue is flushed at the end.
pub fn pair_venues(anchors: &[RawAnchor]) -> Vec<Venue> {
    let mut venues = Vec::new();
    let mut pending: Option<Venue> = None;

    for anchor in anchors {
        match anchor.kind() {
            AnchorKind::Venue => {
                if let Some(prev) = pending.take() {
                    venues.push(prev);
                }
                if anchor.text.is_empty() {
                    continue;
                }
                pending = Some(Venue {
                    name: anchor.text.clone(),
                    location: String::new(),
                    venue_link: anchor.href.clone(),
                    venue_id: venue_id_from_href(&anchor.href),
                });
            }
            AnchorKind::City => match pending.take() {
                Some(mut venue) => {
                    venue.location = anchor.text.clone();
                    venues.push(venue);
                }
                None => venues.push(Venue {
                    name: String::new(),
                    location: anchor.text.clone(),
                    venue_link: String::new(),
                    venue_id: None,
                }),
            },
            AnchorKind::Other => {}
        }
    }

    if let Some(venue) = pending {
        venues.push(venue);
    }

    venues
}

fn venue_id_from_href(href: &str) -> Option<String> {
    let last = href.rsplit('_').next()?;
    let id = last.split('.').next()?;
    (!id.is_empty()).then(|| id.to_string())
}
