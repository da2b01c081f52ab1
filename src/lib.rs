#![forbid(unsafe_code)]

pub mod aggregate;
pub mod app;
pub mod classify;
pub mod cli;
pub mod dates;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod scrape;
