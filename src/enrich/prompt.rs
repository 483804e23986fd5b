// src/enrich/prompt.rs
use crate::enrich::ai_adapter::CompletionRequest;
use crate::model::TrendItem;

const SINGLE_SYSTEM: &str = "You are a concise tech analyst for a professional networking platform. \
Summarize this article into one short highlight (max 40 words) for a feed of tech trends. \
Mention \"AI\", \"startups\", or \"software\" only if relevant. Avoid fluff.";

const BATCH_SYSTEM: &str = "You are a concise tech analyst for a professional networking platform. \
Summarize each article into one short highlight (max 40 words) for a feed of tech trends. \
Mention \"AI\", \"startups\", or \"software\" only if relevant. Avoid fluff. \
Return a JSON array with exactly one highlight per article, in the same order as given.";

const SINGLE_MAX_TOKENS: u32 = 100;
const BATCH_TOKENS_PER_ITEM: u32 = 200;

fn describe(item: &TrendItem) -> String {
    format!(
        "Title: {}\nExcerpt: {}\nSource: {}",
        item.title, item.raw_excerpt, item.source
    )
}

pub fn single_request(item: &TrendItem) -> CompletionRequest {
    CompletionRequest {
        system: SINGLE_SYSTEM.to_string(),
        user: describe(item),
        max_tokens: SINGLE_MAX_TOKENS,
    }
}

/// Numbered articles, blank-line separated. The reply must keep this order.
pub fn batch_request(items: &[TrendItem]) -> CompletionRequest {
    let user = items
        .iter()
        .enumerate()
        .map(|(i, it)| format!("Article {}:\n{}", i + 1, describe(it)))
        .collect::<Vec<_>>()
        .join("\n\n");
    CompletionRequest {
        system: BATCH_SYSTEM.to_string(),
        user,
        max_tokens: BATCH_TOKENS_PER_ITEM.saturating_mul(items.len() as u32),
    }
}
