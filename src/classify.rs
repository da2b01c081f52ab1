use crate::formats::Frequency;

/// Category keyword table; output order follows this table.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Chemical", &["chemical", "biotechnology", "chemistry"]),
    ("Aviation", &["helicopter", "aviation", "aerospace"]),
    ("Pet", &["pet", "animal", "veterinary"]),
    (
        "Construction",
        &["construction", "platform", "elevating", "access"],
    ),
    ("Automotive", &["vehicle", "automotive", "bus", "transport"]),
    (
        "Technology",
        &["digital", "technology", "tech", "electronics", "circuit"],
    ),
    ("Maritime", &["maritime", "ship", "marine"]),
    ("Textile", &["textile", "fabric", "nonwovens"]),
    ("Food", &["food", "beverage", "bakery", "dairy", "tea"]),
    ("Packaging", &["packaging", "label", "printing"]),
    ("Machinery", &["machinery", "equipment", "machine"]),
    ("Medical", &["dental", "medical", "health", "care"]),
    ("Sports", &["sports", "fishing", "outdoor"]),
    ("Lifestyle", &["lifestyle", "luxury", "fashion"]),
    ("Energy", &["energy", "heating", "boiler", "thermal"]),
];

/// Cycle phrases in priority order; the first hit wins.
pub const FREQUENCY_PHRASES: &[(&[&str], Frequency)] = &[
    (&["every 2 years"], Frequency::Biennial),
    (&["every 3 years"], Frequency::Triennial),
    (&["once a year", "annual"], Frequency::Annual),
    (&["twice a year"], Frequency::SemiAnnual),
    (&["monthly"], Frequency::Monthly),
    (&["quarterly"], Frequency::Quarterly),
    (&["unknown"], Frequency::Unknown),
];

/// Case-insensitive substring match against [`CATEGORY_KEYWORDS`].
pub fn extract_categories(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut out: Vec<String> = Vec::new();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k))
            && !out.iter().any(|c| c == category)
        {
            out.push((*category).to_string());
        }
    }
    out
}

pub fn normalize_frequency(text: &str) -> Frequency {
    let lower = text.to_lowercase();
    FREQUENCY_PHRASES
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| lower.contains(p)))
        .map(|(_, frequency)| *frequency)
        .unwrap_or(Frequency::Other)
}
