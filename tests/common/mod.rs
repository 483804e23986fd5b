// tests/common/mod.rs
// Shared stubs: a scripted search backend and a scripted text generator.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use parking_lot::Mutex;

use tech_trends::enrich::ai_adapter::{CompletionRequest, TextGenerator};
use tech_trends::ingest::catalog::CatalogEntry;
use tech_trends::ingest::types::{RawHit, SearchBackend};
use tech_trends::model::{Category, TrendItem};

/// Search stub: fixed hits per query; unknown queries fail.
#[derive(Default)]
pub struct StubSearch {
    pub hits: HashMap<String, Vec<RawHit>>,
    pub calls: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn with(mut self, query: &str, hits: Vec<RawHit>) -> Self {
        self.hits.insert(query.to_string(), hits);
        self
    }
}

#[async_trait::async_trait]
impl SearchBackend for StubSearch {
    async fn search(&self, entry: &CatalogEntry) -> Result<Vec<RawHit>> {
        self.calls.lock().push(entry.query.clone());
        self.hits
            .get(&entry.query)
            .cloned()
            .ok_or_else(|| anyhow!("HTTP 500 for '{}'", entry.query))
    }
    fn name(&self) -> &'static str {
        "stub"
    }
}

type Script = dyn Fn(&CompletionRequest) -> Result<String> + Send + Sync;

/// Generator stub driven by a closure; records every request.
pub struct ScriptedGenerator {
    script: Box<Script>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new<F>(f: F) -> Arc<Self>
    where
        F: Fn(&CompletionRequest) -> Result<String> + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(f),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn batch_calls(&self) -> usize {
        self.requests.lock().iter().filter(|r| is_batch(r)).count()
    }

    pub fn single_calls(&self) -> usize {
        self.requests.lock().iter().filter(|r| !is_batch(r)).count()
    }
}

#[async_trait::async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, req: &CompletionRequest) -> Result<String> {
        self.requests.lock().push(req.clone());
        (self.script)(req)
    }
    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

pub fn is_batch(req: &CompletionRequest) -> bool {
    req.user.starts_with("Article ")
}

/// Titles in payload order.
pub fn titles(req: &CompletionRequest) -> Vec<String> {
    req.user
        .lines()
        .filter_map(|l| l.strip_prefix("Title: "))
        .map(str::to_string)
        .collect()
}

pub fn item(title: &str) -> TrendItem {
    TrendItem {
        title: title.to_string(),
        url: format!("https://news.example/{title}"),
        source: "news.example".to_string(),
        published_at: None,
        raw_excerpt: format!("about {title}"),
        highlight: String::new(),
        category: Category::General,
    }
}

pub fn items(n: usize) -> Vec<TrendItem> {
    (0..n).map(|i| item(&format!("t{i}"))).collect()
}
