use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    pub location: String,
    pub venue_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
}

impl Venue {
    /// Two venues are the same place iff name and city match exactly.
    pub fn same_place(&self, other: &Venue) -> bool {
        self.name == other.name && self.location == other.location
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateInfo {
    pub start: String,
    pub end: String,
    pub duration: u32,
    pub month_year: String,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Frequency {
    Annual,
    Biennial,
    Triennial,
    #[serde(rename = "Semi-annual")]
    SemiAnnual,
    Monthly,
    Quarterly,
    Unknown,
    Other,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::Biennial => "Biennial",
            Frequency::Triennial => "Triennial",
            Frequency::SemiAnnual => "Semi-annual",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Unknown => "Unknown",
            Frequency::Other => "Other",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub id: String,
    pub exhibition_name: String,
    pub description: String,
    /// Row href resolved against the listing page URL. Without a base URL,
    /// or when the href cannot be joined, this is the raw href; empty when
    /// the row has no href.
    pub link: String,
    pub cycle: String,
    pub venues: Vec<Venue>,
    pub date: DateInfo,
    /// `None` when no keyword matched; never `Some(vec![])`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    pub frequency: Frequency,
    pub is_confirmed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub earliest: String,
    pub latest: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub by_city: BTreeMap<String, usize>,
    pub by_frequency: BTreeMap<String, usize>,
    pub by_month: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub total: usize,
    pub exhibitions: Vec<Exhibition>,
    pub venues: Vec<Venue>,
    pub cities: Vec<String>,
    pub date_range: DateRange,
    pub statistics: Statistics,
}

/// JSON envelope returned by the HTTP surface on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
