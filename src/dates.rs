use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

use crate::formats::DateInfo;

static RE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("invalid regex: date"));
static RE_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+days?").expect("invalid regex: duration"));
static RE_MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+\.?\s+\d{4}").expect("invalid regex: month year"));

/// Best-effort parse of a listing date cell such as `"04/15/2024 5 days"`.
///
/// Only the first `M/D/YYYY` occurrence is considered. `end` is filled only
/// when the start is a real calendar date and the duration is positive; the
/// day count is inclusive, so a 1-day event ends on its start date.
pub fn parse_date_info(text: &str) -> DateInfo {
    let date_caps = RE_DATE.captures(text);
    let start = date_caps
        .as_ref()
        .and_then(|caps| caps.get(0))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let duration = RE_DURATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    let month_year = RE_MONTH_YEAR
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let mut end = String::new();
    if let Some(caps) = date_caps
        && duration > 0
    {
        let (month, day, year) = (&caps[1], &caps[2], &caps[3]);
        if let Some(start_date) = calendar_date(month, day, year)
            && let Some(end_date) = start_date.checked_add_days(Days::new(u64::from(duration) - 1))
        {
            end = format_like(end_date, month.len() > 1, day.len() > 1);
        }
    }

    DateInfo {
        start,
        end,
        duration,
        month_year,
        raw: text.to_string(),
    }
}

/// Parse a `M/D/YYYY` start string into a calendar date.
pub fn parse_start_date(start: &str) -> Option<NaiveDate> {
    let caps = RE_DATE.captures(start)?;
    calendar_date(&caps[1], &caps[2], &caps[3])
}

fn calendar_date(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn format_like(date: NaiveDate, pad_month: bool, pad_day: bool) -> String {
    let month = if pad_month { "%m" } else { "%-m" };
    let day = if pad_day { "%d" } else { "%-d" };
    date.format(&format!("{month}/{day}/%Y")).to_string()
}
