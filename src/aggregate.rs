use std::collections::BTreeSet;

use crate::dates::parse_start_date;
use crate::formats::{DateRange, Exhibition, Statistics, Venue};

/// Count exhibitions by city, frequency and start month.
///
/// `by_city` counts every venue with a city, so one exhibition with three
/// venues in the same city adds three.
pub fn aggregate(exhibitions: &[Exhibition]) -> Statistics {
    let mut stats = Statistics::default();

    for exhibition in exhibitions {
        for venue in &exhibition.venues {
            if !venue.location.is_empty() {
                *stats.by_city.entry(venue.location.clone()).or_insert(0) += 1;
            }
        }

        *stats
            .by_frequency
            .entry(exhibition.frequency.as_str().to_string())
            .or_insert(0) += 1;

        if let Some(month) = exhibition
            .date
            .start
            .split('/')
            .next()
            .filter(|m| !m.is_empty())
        {
            *stats.by_month.entry(month.to_string()).or_insert(0) += 1;
        }
    }

    stats
}

/// First occurrence of each `(name, location)` pair, in order of appearance.
pub fn dedup_venues<'a>(venues: impl IntoIterator<Item = &'a Venue>) -> Vec<Venue> {
    let mut out: Vec<Venue> = Vec::new();
    for venue in venues {
        if !out.iter().any(|seen| seen.same_place(venue)) {
            out.push(venue.clone());
        }
    }
    out
}

pub fn collect_cities(exhibitions: &[Exhibition]) -> Vec<String> {
    exhibitions
        .iter()
        .flat_map(|e| e.venues.iter())
        .filter(|v| !v.location.is_empty())
        .map(|v| v.location.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Earliest and latest start dates, compared chronologically.
///
/// Start strings that are not real calendar dates sort after every valid date
/// and among themselves by text.
pub fn date_range(exhibitions: &[Exhibition]) -> DateRange {
    let mut starts = exhibitions
        .iter()
        .map(|e| e.date.start.as_str())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|s| {
            let date = parse_start_date(s);
            (date.is_none(), date, s)
        })
        .collect::<Vec<_>>();
    starts.sort();

    DateRange {
        earliest: starts.first().map(|(_, _, s)| s.to_string()).unwrap_or_default(),
        latest: starts.last().map(|(_, _, s)| s.to_string()).unwrap_or_default(),
    }
}
