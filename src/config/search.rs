// src/config/search.rs
use std::time::Duration;

use super::{non_empty, parsed_or};

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search settings.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
    /// Two-letter country code, e.g. "US". Sent as `cr=country<code>`.
    pub region: String,
    /// Language restriction sent as `lr`, e.g. "lang_en".
    pub language: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            region: "US".to_string(),
            language: "lang_en".to_string(),
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl SearchConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            api_key: non_empty(lookup, "GOOGLE_SEARCH_API_KEY"),
            engine_id: non_empty(lookup, "GOOGLE_SEARCH_ENGINE_ID"),
            region: non_empty(lookup, "GOOGLE_TRENDS_REGION").unwrap_or(d.region),
            language: non_empty(lookup, "GOOGLE_SEARCH_LANGUAGE").unwrap_or(d.language),
            endpoint: non_empty(lookup, "GOOGLE_SEARCH_ENDPOINT").unwrap_or(d.endpoint),
            timeout: Duration::from_secs(parsed_or(lookup, "GOOGLE_SEARCH_TIMEOUT_SECS", 30u64)),
        }
    }

    /// Both key and engine id are required.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }
}
