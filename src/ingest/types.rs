// src/ingest/types.rs
use std::collections::HashMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ingest::catalog::CatalogEntry;
use crate::model::Category;

/// One search result before normalization. Field names follow the
/// Google Custom Search item shape; `category`/`query` are added by the fan-out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub pagemap: Option<PageMap>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMap {
    #[serde(default)]
    pub metatags: Vec<HashMap<String, serde_json::Value>>,
}

impl RawHit {
    /// Convenience constructor for hand-built hits.
    pub fn new(title: &str, link: &str, snippet: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            link: Some(link.to_string()),
            snippet: Some(snippet.to_string()),
            ..Self::default()
        }
    }

    pub fn with_metatag(mut self, key: &str, value: &str) -> Self {
        let pm = self.pagemap.get_or_insert_with(PageMap::default);
        if pm.metatags.is_empty() {
            pm.metatags.push(HashMap::new());
        }
        pm.metatags[0].insert(key.to_string(), serde_json::Value::from(value));
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// String value of `key` in the first metatag block, if non-empty.
    pub fn metatag(&self, key: &str) -> Option<&str> {
        self.pagemap
            .as_ref()?
            .metatags
            .first()?
            .get(key)?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}

/// A search provider queried once per catalog entry.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Results for one entry. Tagging with the entry's category is the caller's job.
    async fn search(&self, entry: &CatalogEntry) -> Result<Vec<RawHit>>;
    fn name(&self) -> &'static str;
}
