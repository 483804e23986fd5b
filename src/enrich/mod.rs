// src/enrich/mod.rs
//! Highlight enrichment: batches normalized items through a text generator.
//!
//! Never reorders or drops items. Every failure path leaves the affected
//! items with an empty highlight and moves on to the next batch.

pub mod ai_adapter;
pub mod parse;
pub mod prompt;

use anyhow::Result;
use metrics::counter;

use crate::config::BatchPolicy;
use crate::enrich::ai_adapter::{DynGenerator, TextGenerator};
use crate::enrich::parse::{parse_highlights, ParseStrategy};
use crate::model::TrendItem;

pub use ai_adapter::{build_generator, CompletionRequest};

/// How a batch ended up with its highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// One-item batch, answered by a direct call.
    Single,
    /// Combined reply read by this strategy.
    Parsed(ParseStrategy),
    /// Combined reply unusable; one call per item.
    Individual,
}

#[derive(Clone)]
pub struct Enricher {
    generator: Option<DynGenerator>,
    policy: BatchPolicy,
}

impl Enricher {
    pub fn new(generator: Option<DynGenerator>, policy: BatchPolicy) -> Self {
        Self { generator, policy }
    }

    /// No backend: `enrich` returns its input untouched.
    pub fn disabled() -> Self {
        Self::new(None, BatchPolicy::default())
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// Attach a highlight to every item, batch by batch, in input order.
    pub async fn enrich(&self, mut items: Vec<TrendItem>) -> Vec<TrendItem> {
        let Some(generator) = self.generator.as_deref() else {
            tracing::warn!("text generator not configured, skipping AI enrichment");
            return items;
        };
        if items.is_empty() {
            return items;
        }

        let size = self.policy.batch_size.max(1);
        let batches = items.len().div_ceil(size);

        for (idx, batch) in items.chunks_mut(size).enumerate() {
            counter!("trends_enrich_batches_total").increment(1);
            match enrich_batch(generator, batch).await {
                Ok(outcome) => {
                    tracing::debug!(batch = idx, len = batch.len(), ?outcome, "batch enriched");
                    if let BatchOutcome::Parsed(ParseStrategy::LineSplit) | BatchOutcome::Individual =
                        outcome
                    {
                        counter!("trends_enrich_fallback_total", "outcome" => outcome_label(outcome))
                            .increment(1);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = ?e,
                        batch = idx,
                        provider = generator.provider_name(),
                        "error enriching batch"
                    );
                    counter!("trends_enrich_errors_total", "scope" => "batch").increment(1);
                }
            }

            if idx + 1 < batches && !self.policy.inter_batch_delay.is_zero() {
                tokio::time::sleep(self.policy.inter_batch_delay).await;
            }
        }

        items
    }
}

fn outcome_label(outcome: BatchOutcome) -> &'static str {
    match outcome {
        BatchOutcome::Single => "single",
        BatchOutcome::Parsed(s) => s.name(),
        BatchOutcome::Individual => "individual",
    }
}

/// Fill highlights for one batch. An `Err` leaves the batch as it was.
pub async fn enrich_batch(
    generator: &dyn TextGenerator,
    batch: &mut [TrendItem],
) -> Result<BatchOutcome> {
    match batch.len() {
        0 => Ok(BatchOutcome::Single),
        1 => {
            let item = &mut batch[0];
            let reply = generator.complete(&prompt::single_request(item)).await?;
            item.highlight = reply.trim().to_string();
            Ok(BatchOutcome::Single)
        }
        _ => {
            let reply = generator.complete(&prompt::batch_request(batch)).await?;
            if !reply.trim().is_empty() {
                if let Some((strategy, highlights)) = parse_highlights(&reply, batch.len()) {
                    for (item, h) in batch.iter_mut().zip(highlights) {
                        item.highlight = h;
                    }
                    return Ok(BatchOutcome::Parsed(strategy));
                }
            }
            enrich_individually(generator, batch).await;
            Ok(BatchOutcome::Individual)
        }
    }
}

/// One call per item; a failing item gets an empty highlight.
async fn enrich_individually(generator: &dyn TextGenerator, batch: &mut [TrendItem]) {
    for item in batch.iter_mut() {
        match generator.complete(&prompt::single_request(item)).await {
            Ok(reply) => item.highlight = reply.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = ?e, url = %item.url, "error generating highlight for item");
                counter!("trends_enrich_errors_total", "scope" => "item").increment(1);
                item.highlight = String::new();
            }
        }
    }
}
