// src/model.rs
//! Wire types for the trends feed: what the normalizer builds and the API returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed set of feed categories. Assigned by the catalog entry that found the item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Startups,
    SoftwareEngineering,
    Ai,
    Engineering,
    #[default]
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Startups => "startups",
            Category::SoftwareEngineering => "software_engineering",
            Category::Ai => "ai",
            Category::Engineering => "engineering",
            Category::General => "general",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered article.
///
/// Everything except `highlight` is fixed by the normalizer; the enricher
/// fills `highlight` at most once per pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendItem {
    pub title: String,
    pub url: String,
    /// Host of `url` without a leading `www.`, or `"unknown"`.
    pub source: String,
    pub published_at: Option<DateTime<Utc>>,
    pub raw_excerpt: String,
    #[serde(default)]
    pub highlight: String,
    pub category: Category,
}

/// Response of `GET /api/trends`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsResponse {
    pub items: Vec<TrendItem>,
    pub last_updated: DateTime<Utc>,
}

impl TrendsResponse {
    /// Stamp the response with the current time.
    pub fn now(items: Vec<TrendItem>) -> Self {
        Self {
            items,
            last_updated: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::now(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_snake_case() {
        let s = serde_json::to_string(&Category::SoftwareEngineering).unwrap();
        assert_eq!(s, "\"software_engineering\"");
        let c: Category = serde_json::from_str("\"ai\"").unwrap();
        assert_eq!(c, Category::Ai);
    }

    #[test]
    fn missing_date_serializes_as_null() {
        let item = TrendItem {
            title: "t".into(),
            url: "https://example.com/a".into(),
            source: "example.com".into(),
            published_at: None,
            raw_excerpt: String::new(),
            highlight: String::new(),
            category: Category::General,
        };
        let v = serde_json::to_value(&item).unwrap();
        assert!(v["published_at"].is_null());
        assert_eq!(v["category"], "general");
    }
}
