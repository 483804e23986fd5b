// src/ingest/mod.rs
pub mod catalog;
pub mod normalize;
pub mod providers;
pub mod types;

use crate::ingest::catalog::CatalogEntry;
use crate::ingest::types::{RawHit, SearchBackend};
use futures::future::join_all;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

pub use normalize::{normalize_hits, normalize_hits_with_stats, NormalizeStats};

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "trends_search_requests_total",
            "Search requests issued, one per catalog entry."
        );
        describe_counter!(
            "trends_search_errors_total",
            "Catalog entries whose search failed."
        );
        describe_counter!("trends_hits_total", "Raw hits returned by search.");
        describe_counter!(
            "trends_normalized_total",
            "Items kept after normalization."
        );
        describe_counter!(
            "trends_dropped_total",
            "Hits dropped as duplicates or incomplete."
        );
        describe_counter!(
            "trends_enrich_batches_total",
            "Enrichment batches processed."
        );
        describe_counter!(
            "trends_enrich_fallback_total",
            "Batches resolved by a fallback strategy."
        );
        describe_counter!(
            "trends_enrich_errors_total",
            "Enrichment batches or items that failed."
        );
        describe_histogram!(
            "trends_pipeline_duration_ms",
            "End-to-end pipeline time in milliseconds."
        );
        describe_gauge!(
            "trends_pipeline_last_run_ts",
            "Unix ts when the trends pipeline last finished."
        );
    });
}

/// Search every catalog entry concurrently and merge the results.
///
/// Each hit is tagged with its entry's category and query. A failing entry is
/// logged and contributes nothing; the others are unaffected. Results are
/// concatenated in catalog order once all requests have resolved.
pub async fn fetch_raw_hits(backend: &dyn SearchBackend, catalog: &[CatalogEntry]) -> Vec<RawHit> {
    ensure_metrics_described();

    let calls = catalog.iter().map(|entry| async move {
        counter!("trends_search_requests_total").increment(1);
        (entry, backend.search(entry).await)
    });

    let mut raw = Vec::new();
    for (entry, res) in join_all(calls).await {
        match res {
            Ok(hits) => {
                tracing::info!(
                    query = %entry.query,
                    count = hits.len(),
                    "fetched search results"
                );
                raw.extend(hits.into_iter().map(|mut h| {
                    h.category = entry.category;
                    h.query = Some(entry.query.clone());
                    h
                }));
            }
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    provider = backend.name(),
                    query = %entry.query,
                    "search entry failed"
                );
                counter!("trends_search_errors_total", "category" => entry.category.as_str())
                    .increment(1);
            }
        }
    }

    counter!("trends_hits_total").increment(raw.len() as u64);
    raw
}

/// Like `fetch_raw_hits`, but an absent backend is a valid empty result.
pub async fn fetch_raw_trends(
    backend: Option<&dyn SearchBackend>,
    catalog: &[CatalogEntry],
) -> Vec<RawHit> {
    match backend {
        Some(b) => fetch_raw_hits(b, catalog).await,
        None => {
            tracing::warn!("search backend not configured, returning empty results");
            Vec::new()
        }
    }
}
