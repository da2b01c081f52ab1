use axum::http::StatusCode;

/// Failures that abort a scrape run.
///
/// Malformed or missing markup is deliberately absent here: the extractor
/// degrades to empty rows instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The source answered with a non-2xx status.
    #[error("Failed to fetch: {status} {status_text}")]
    Fetch { status: u16, status_text: String },

    /// DNS, connect, timeout or body-read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The custom-URL request carried no `url`.
    #[error("URL is required")]
    MissingUrl,

    /// Caller-supplied input was unusable.
    #[error("{0}")]
    Validation(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ScrapeError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScrapeError::MissingUrl | ScrapeError::Validation(_) | ScrapeError::InvalidUrl(_) => {
                StatusCode::BAD_REQUEST
            }
            ScrapeError::Fetch { .. } | ScrapeError::Network(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
