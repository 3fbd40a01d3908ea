//! The fetch collaborator boundary: the injected `DataFetcher` trait, an
//! HTTP implementation against the data endpoint, and a caching wrapper.
//! Failures here are recoverable by user retry; the coordinator contains
//! them and never lets a partial result reach rendering code.

use crate::error::{Result as VizResult, VizError};
use async_trait::async_trait;
use moka::future::Cache;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

/// Error types at the fetch collaborator boundary
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure, including timeouts
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The response body is not the expected JSON shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            FetchError::Decode(error.to_string())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

/// The injected fetch collaborator. One call fetches either a truth series
/// (`is_forecast` false) or a forecast set (`is_forecast` true) for the
/// given target variable, unit and reference date, returning the raw JSON
/// body; the controller owns decoding.
#[async_trait]
pub trait DataFetcher: Send + Sync {
    async fn fetch_data(
        &self,
        is_forecast: bool,
        target_key: &str,
        unit_abbrev: &str,
        reference_date: &str,
    ) -> Result<Value, FetchError>;
}

#[async_trait]
impl<F: DataFetcher + ?Sized> DataFetcher for std::sync::Arc<F> {
    async fn fetch_data(
        &self,
        is_forecast: bool,
        target_key: &str,
        unit_abbrev: &str,
        reference_date: &str,
    ) -> Result<Value, FetchError> {
        (**self)
            .fetch_data(is_forecast, target_key, unit_abbrev, reference_date)
            .await
    }
}

/// `DataFetcher` over HTTP: a GET against `{base_url}/viz-data` with the
/// request parameters as query arguments.
pub struct HttpDataFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> VizResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VizError::Config(format!("could not build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DataFetcher for HttpDataFetcher {
    #[instrument(skip(self))]
    async fn fetch_data(
        &self,
        is_forecast: bool,
        target_key: &str,
        unit_abbrev: &str,
        reference_date: &str,
    ) -> Result<Value, FetchError> {
        let url = format!("{}/viz-data", self.base_url);
        debug!(%url, "GET viz data");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("is_forecast", if is_forecast { "true" } else { "false" }),
                ("target_key", target_key),
                ("unit_abbrev", unit_abbrev),
                ("reference_date", reference_date),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("GET {url} - request failed: {e}");
                FetchError::from(e)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            error!("GET {url} - HTTP error: {status}");
            return Err(FetchError::Status(status));
        }

        response.json::<Value>().await.map_err(|e| {
            error!("GET {url} - failed to parse response: {e}");
            FetchError::Decode(e.to_string())
        })
    }
}

/// Caches successful responses of an inner fetcher, keyed the same way the
/// endpoint keys its own cache: `"{0|1}|{target}|{unit}|{date}"`. Failures
/// are never cached.
pub struct CachedFetcher<F> {
    inner: F,
    cache: Cache<String, Value>,
}

impl<F> CachedFetcher<F> {
    pub fn new(inner: F, capacity: u64, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<F: DataFetcher> DataFetcher for CachedFetcher<F> {
    async fn fetch_data(
        &self,
        is_forecast: bool,
        target_key: &str,
        unit_abbrev: &str,
        reference_date: &str,
    ) -> Result<Value, FetchError> {
        let cache_key = format!(
            "{}|{}|{}|{}",
            u8::from(is_forecast),
            target_key,
            unit_abbrev,
            reference_date
        );
        if let Some(value) = self.cache.get(&cache_key).await {
            debug!(%cache_key, "viz data served from cache");
            return Ok(value);
        }

        let value = self
            .inner
            .fetch_data(is_forecast, target_key, unit_abbrev, reference_date)
            .await?;
        self.cache.insert(cache_key, value.clone()).await;
        Ok(value)
    }
}
