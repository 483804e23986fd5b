// src/ingest/normalize.rs
//! Raw hits → deduplicated, sorted `TrendItem`s.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::ingest::types::RawHit;
use crate::model::TrendItem;

pub const UNKNOWN_SOURCE: &str = "unknown";

/// Metatag keys checked for a publish date, in order.
const DATE_KEYS: [&str; 2] = ["article:published_time", "og:updated_time"];

/// Counters from one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub kept: usize,
    pub duplicates: usize,
    pub incomplete: usize,
}

/// Normalize with stats discarded.
pub fn normalize_hits(raw: Vec<RawHit>) -> Vec<TrendItem> {
    normalize_hits_with_stats(raw).0
}

/// Dedup by exact URL (first wins, even across categories), drop hits without
/// link or title, then sort newest first.
pub fn normalize_hits_with_stats(raw: Vec<RawHit>) -> (Vec<TrendItem>, NormalizeStats) {
    let mut stats = NormalizeStats::default();
    let mut seen_urls: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut items = Vec::with_capacity(raw.len());

    for hit in raw {
        let url = hit.link.clone().unwrap_or_default();

        // URL is consumed before the completeness check.
        if !seen_urls.insert(url.clone()) {
            stats.duplicates += 1;
            continue;
        }

        let title = hit.title.clone().unwrap_or_default();
        if url.is_empty() || title.is_empty() {
            stats.incomplete += 1;
            continue;
        }

        items.push(TrendItem {
            source: source_domain(&url),
            published_at: published_at(&hit),
            raw_excerpt: hit.snippet.unwrap_or_default(),
            highlight: String::new(),
            category: hit.category,
            title,
            url,
        });
    }

    sort_newest_first(&mut items);
    stats.kept = items.len();
    (items, stats)
}

/// Descending by `(published_at, title)`; undated items count as the earliest
/// possible date. Stable, so exact ties keep input order.
pub fn sort_newest_first(items: &mut [TrendItem]) {
    items.sort_by(|a, b| compare_sort_key(b, a));
}

fn compare_sort_key(a: &TrendItem, b: &TrendItem) -> Ordering {
    let da = a.published_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
    let db = b.published_at.unwrap_or(DateTime::<Utc>::MIN_UTC);
    da.cmp(&db).then_with(|| a.title.cmp(&b.title))
}

/// Host of `url` without a leading `www.`; `"unknown"` when there is none.
pub fn source_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .map(|h| h.strip_prefix("www.").map(str::to_string).unwrap_or(h))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

/// First parseable date from the hit's metatags. Never fails.
pub fn published_at(hit: &RawHit) -> Option<DateTime<Utc>> {
    let raw = DATE_KEYS.iter().find_map(|k| hit.metatag(k))?;
    parse_timestamp(raw)
}

/// RFC 3339, naive ISO datetime (UTC assumed), or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offsets without a colon, e.g. `+0000`.
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}
