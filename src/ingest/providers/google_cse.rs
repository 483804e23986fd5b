// src/ingest/providers/google_cse.rs
//! Google Custom Search JSON API (Programmable Search) backend.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::ingest::catalog::CatalogEntry;
use crate::ingest::types::{RawHit, SearchBackend};

/// Provider-side cap on `num` per request.
pub const MAX_RESULTS_PER_REQUEST: u32 = 10;

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<RawHit>,
}

pub struct GoogleCseProvider {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
    region: String,
    language: String,
}

impl GoogleCseProvider {
    /// `None` when key or engine id is missing; the fan-out then returns nothing.
    pub fn from_config(cfg: &SearchConfig) -> Result<Option<Self>> {
        let (Some(api_key), Some(engine_id)) = (cfg.api_key.clone(), cfg.engine_id.clone())
        else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .user_agent(concat!("tech-trends-service/", env!("CARGO_PKG_VERSION")))
            .timeout(cfg.timeout)
            .build()
            .context("building search http client")?;
        Ok(Some(Self {
            http,
            endpoint: cfg.endpoint.clone(),
            api_key,
            engine_id,
            region: cfg.region.clone(),
            language: cfg.language.clone(),
        }))
    }

    /// Query parameters for one entry, key excluded.
    fn params(&self, entry: &CatalogEntry) -> Vec<(&'static str, String)> {
        vec![
            ("cx", self.engine_id.clone()),
            ("q", entry.query.clone()),
            (
                "num",
                entry.num_results.min(MAX_RESULTS_PER_REQUEST).to_string(),
            ),
            ("lr", self.language.clone()),
            ("cr", format!("country{}", self.region.to_ascii_lowercase())),
        ]
    }
}

#[async_trait]
impl SearchBackend for GoogleCseProvider {
    async fn search(&self, entry: &CatalogEntry) -> Result<Vec<RawHit>> {
        tracing::info!(query = %entry.query, "fetching trends for query");

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .query(&self.params(entry))
            .send()
            .await
            .with_context(|| format!("search request for '{}'", entry.query))?;

        let status = resp.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                tracing::warn!(query = %entry.query, "search rate limit hit");
            }
            return Err(anyhow!(
                "search HTTP error {} for '{}'",
                status.as_u16(),
                entry.query
            ));
        }

        let body: CseResponse = resp
            .json()
            .await
            .with_context(|| format!("decoding search response for '{}'", entry.query))?;
        Ok(body.items)
    }

    fn name(&self) -> &'static str {
        "google_cse"
    }
}
