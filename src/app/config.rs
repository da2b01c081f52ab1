use std::time::Duration;

use url::Url;

use crate::fetch::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS, TIMEOUT_RANGE_SECS};

pub const SOURCE_URL_ENV: &str = "FAIRSCRAPE_SOURCE_URL";
pub const FETCH_TIMEOUT_ENV: &str = "FAIRSCRAPE_FETCH_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source_url: Url,
    pub fetch_timeout: Duration,
}

impl AppConfig {
    /// Resolve the server configuration: environment overrides flags.
    pub fn resolve(
        flag_source_url: Option<&str>,
        flag_timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        Self::resolve_with(flag_source_url, flag_timeout_secs, |key| {
            std::env::var(key).ok()
        })
    }

    pub fn resolve_with(
        flag_source_url: Option<&str>,
        flag_timeout_secs: Option<u64>,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let source_url = env(SOURCE_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| flag_source_url.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let source_url = Url::parse(&source_url)
            .map_err(|err| anyhow::anyhow!("invalid source url {source_url:?}: {err}"))?;
        if source_url.scheme() != "http" && source_url.scheme() != "https" {
            anyhow::bail!("source url must be http/https: {source_url}");
        }

        let timeout_secs = env(FETCH_TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| TIMEOUT_RANGE_SECS.contains(v))
            .or(flag_timeout_secs.filter(|v| TIMEOUT_RANGE_SECS.contains(v)))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            source_url,
            fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
