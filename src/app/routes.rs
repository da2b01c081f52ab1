use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::app::config::AppConfig;
use crate::error::ScrapeError;
use crate::fetch::Fetcher;
use crate::formats::{ErrorBody, ScrapeResult};
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub source_url: Arc<Url>,
    pub fetcher: Fetcher,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: &AppConfig, metrics: Metrics) -> Result<Self, ScrapeError> {
        Ok(Self {
            source_url: Arc::new(config.source_url.clone()),
            fetcher: Fetcher::new(config.fetch_timeout)?,
            metrics,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/api/scrape", get(scrape_source).post(scrape_custom))
        .route("/api/metrics", get(metrics_snapshot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ScrapeRequest {
    #[serde(default)]
    url: Option<String>,
}

/// Uniform JSON error envelope.
#[derive(Debug)]
pub struct ApiError(ScrapeError);

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let error = match &self.0 {
            ScrapeError::MissingUrl => "URL is required",
            ScrapeError::Validation(_) => "Invalid request",
            ScrapeError::InvalidUrl(_) => "Invalid URL",
            ScrapeError::Fetch { .. } | ScrapeError::Network(_) => "Failed to scrape data",
        };
        if status.is_server_error() {
            tracing::error!(err = %self.0, "scrape failed");
        } else {
            tracing::warn!(err = %self.0, "rejected scrape request");
        }
        let body = ErrorBody {
            error: error.to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn scrape_source(State(state): State<AppState>) -> Result<Json<ScrapeResult>, ApiError> {
    let result = crate::pipeline::scrape(&state.fetcher, &state.source_url, &state.metrics).await?;
    Ok(Json(result))
}

async fn scrape_custom(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScrapeResult>, ApiError> {
    let request: ScrapeRequest = serde_json::from_slice(&body)
        .map_err(|err| ScrapeError::Validation(format!("request body must be JSON: {err}")))?;
    let raw = request.url.as_deref().map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ScrapeError::MissingUrl.into());
    }
    let url = Url::parse(raw).map_err(ScrapeError::from)?;

    let result = crate::pipeline::scrape(&state.fetcher, &url, &state.metrics).await?;
    Ok(Json(result))
}

async fn metrics_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot: BTreeMap<String, f64> = state.metrics.snapshot();
    (StatusCode::OK, Json(snapshot))
}
