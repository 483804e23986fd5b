// src/service.rs
//! Orchestrator: search fan-out → normalize → enrich → timestamped response.
//!
//! `get_trends` never fails. Any error or panic inside the pipeline is logged
//! and turned into an empty response.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{ensure, Result};
use futures::FutureExt;
use metrics::{counter, gauge, histogram};
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::enrich::{build_generator, Enricher};
use crate::ingest::catalog::CatalogEntry;
use crate::ingest::providers::google_cse::GoogleCseProvider;
use crate::ingest::types::SearchBackend;
use crate::ingest::{ensure_metrics_described, fetch_raw_trends, normalize_hits_with_stats};
use crate::model::{TrendItem, TrendsResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Fetching,
    Normalizing,
    Enriching,
    Done,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipelineStage::Fetching => "fetching",
            PipelineStage::Normalizing => "normalizing",
            PipelineStage::Enriching => "enriching",
            PipelineStage::Done => "done",
        };
        f.write_str(s)
    }
}

pub struct TrendsService {
    search: Option<Arc<dyn SearchBackend>>,
    enricher: Enricher,
    catalog: Vec<CatalogEntry>,
    /// An OpenAI key was supplied. The mock generator enriches without one.
    openai_key_present: bool,
}

impl TrendsService {
    pub fn new(
        search: Option<Arc<dyn SearchBackend>>,
        enricher: Enricher,
        catalog: Vec<CatalogEntry>,
    ) -> Self {
        Self {
            search,
            openai_key_present: enricher.is_configured(),
            enricher,
            catalog,
        }
    }

    /// Wire the real backends. Unconfigured backends stay `None`.
    pub fn from_config(cfg: &AppConfig, catalog: Vec<CatalogEntry>) -> Result<Self> {
        let search = GoogleCseProvider::from_config(&cfg.search)?
            .map(|p| Arc::new(p) as Arc<dyn SearchBackend>);
        let enricher = Enricher::new(build_generator(&cfg.ai)?, cfg.policy);
        Ok(Self {
            openai_key_present: cfg.ai.api_key.is_some(),
            ..Self::new(search, enricher, catalog)
        })
    }

    pub fn search_configured(&self) -> bool {
        self.search.is_some()
    }

    pub fn enrichment_configured(&self) -> bool {
        self.enricher.is_configured()
    }

    /// Health flag: key presence, not whether highlights will be produced.
    pub fn openai_configured(&self) -> bool {
        self.openai_key_present
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// Run the whole pipeline once. `last_updated` is stamped on completion.
    pub async fn get_trends(&self) -> TrendsResponse {
        ensure_metrics_described();
        let t0 = Instant::now();

        let items = match AssertUnwindSafe(self.run_pipeline()).catch_unwind().await {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                error!(error = ?e, "error in trends pipeline, returning empty response");
                Vec::new()
            }
            Err(panic) => {
                error!(
                    panic = %panic_message(panic.as_ref()),
                    "trends pipeline panicked, returning empty response"
                );
                Vec::new()
            }
        };

        let response = TrendsResponse::now(items);
        debug!(stage = %PipelineStage::Done, items = response.items.len(), "pipeline stage");
        histogram!("trends_pipeline_duration_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        gauge!("trends_pipeline_last_run_ts").set(response.last_updated.timestamp() as f64);
        response
    }

    async fn run_pipeline(&self) -> Result<Vec<TrendItem>> {
        debug!(stage = %PipelineStage::Fetching, entries = self.catalog.len(), "pipeline stage");
        let raw = fetch_raw_trends(self.search.as_deref(), &self.catalog).await;
        if raw.is_empty() {
            warn!("no raw trends fetched, returning empty response");
            return Ok(Vec::new());
        }

        debug!(stage = %PipelineStage::Normalizing, raw = raw.len(), "pipeline stage");
        let (items, stats) = normalize_hits_with_stats(raw);
        counter!("trends_normalized_total").increment(stats.kept as u64);
        counter!("trends_dropped_total", "reason" => "duplicate").increment(stats.duplicates as u64);
        counter!("trends_dropped_total", "reason" => "incomplete").increment(stats.incomplete as u64);
        info!(
            kept = stats.kept,
            duplicates = stats.duplicates,
            incomplete = stats.incomplete,
            "normalized raw hits"
        );

        debug!(stage = %PipelineStage::Enriching, items = items.len(), "pipeline stage");
        let expected = items.len();
        let enriched = self.enricher.enrich(items).await;
        ensure!(
            enriched.len() == expected,
            "enricher returned {} items, expected {expected}",
            enriched.len()
        );
        Ok(enriched)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
