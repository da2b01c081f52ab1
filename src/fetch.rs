use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use url::Url;

use crate::error::ScrapeError;

pub const DEFAULT_SOURCE_URL: &str = "https://www.eventseye.com/fairs/c1_trade-shows_china.html";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Accepted fetch timeouts, in seconds; keep in sync with the clap ranges.
pub const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=300;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Final URL after redirects; exhibition links are resolved against it.
    pub url: Url,
    pub html: String,
}

/// Single-attempt HTML fetcher. Retrying is left to the caller.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_document(&self, url: &Url) -> Result<FetchedDocument, ScrapeError> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ScrapeError::Validation(format!(
                "url scheme must be http/https: {url}"
            )));
        }

        tracing::debug!(%url, "fetching listing page");
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, BROWSER_ACCEPT)
            .header(ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Fetch {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let final_url = response.url().clone();
        let html = response.text().await?;
        tracing::debug!(url = %final_url, bytes = html.len(), "fetched listing page");

        Ok(FetchedDocument {
            url: final_url,
            html,
        })
    }
}
