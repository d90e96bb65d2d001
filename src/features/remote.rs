//! Remote data sources
//!
//! Index entries and tower stat dumps live on third-party HTTP services.
//! Handlers reach them through [`RemoteSource`] so tests can swap in canned
//! responses.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;

#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// GET `url` with query parameters and parse the body as JSON
    ///
    /// Transport failures and non-success statuses are errors.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value>;

    /// GET `url` as plain text
    async fn get_text(&self, url: &str) -> Result<String>;
}

/// [`RemoteSource`] backed by a shared reqwest client
#[derive(Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        debug!("GET {url} {query:?}");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request to {url} failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("{url} returned HTTP {status}"));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        Ok(self.fetch(url, query).await?.json::<Value>().await?)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.fetch(url, &[]).await?.text().await?)
    }
}
