// tests/pipeline_e2e.rs
mod common;

use std::sync::Arc;

use chrono::Utc;
use common::{titles, ScriptedGenerator, StubSearch};
use tech_trends::config::{AppConfig, BatchPolicy};
use tech_trends::enrich::ai_adapter::DynGenerator;
use tech_trends::enrich::Enricher;
use tech_trends::ingest::catalog::{default_catalog, CatalogEntry};
use tech_trends::ingest::types::{RawHit, SearchBackend};
use tech_trends::model::Category;
use tech_trends::TrendsService;

fn catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("ai news", Category::Ai, 8),
        CatalogEntry::new("startup news", Category::Startups, 8),
    ]
}

fn echo_generator() -> DynGenerator {
    ScriptedGenerator::new(|req| {
        let hl: Vec<String> = titles(req).iter().map(|t| format!("hl-{t}")).collect();
        if hl.len() == 1 {
            return Ok(hl[0].clone());
        }
        Ok(serde_json::to_string(&hl)?)
    })
}

fn service(search: StubSearch, gen: Option<DynGenerator>) -> TrendsService {
    TrendsService::new(
        Some(Arc::new(search) as Arc<dyn SearchBackend>),
        Enricher::new(gen, BatchPolicy::default().without_delay()),
        catalog(),
    )
}

#[tokio::test]
async fn zero_hits_gives_empty_response_stamped_now() {
    let search = StubSearch::default()
        .with("ai news", vec![])
        .with("startup news", vec![]);
    let gen = ScriptedGenerator::new(|_| Ok("never".into()));
    let svc = service(search, Some(gen.clone() as DynGenerator));

    let before = Utc::now();
    let resp = svc.get_trends().await;
    assert!(resp.items.is_empty());
    assert!(resp.last_updated >= before);
    assert!(resp.last_updated <= Utc::now());
    // Enrichment skipped entirely.
    assert!(gen.requests.lock().is_empty());
}

#[tokio::test]
async fn same_url_across_entries_yields_one_item() {
    let search = StubSearch::default()
        .with(
            "ai news",
            vec![RawHit::new("First title", "https://e.com/story", "a")],
        )
        .with(
            "startup news",
            vec![RawHit::new("Other title", "https://e.com/story", "b")],
        );
    let resp = service(search, Some(echo_generator())).get_trends().await;
    assert_eq!(resp.items.len(), 1);
    assert_eq!(resp.items[0].title, "First title");
    assert_eq!(resp.items[0].category, Category::Ai);
    assert_eq!(resp.items[0].highlight, "hl-First title");
}

#[tokio::test]
async fn search_failing_everywhere_is_well_formed_empty() {
    // No scripted queries: every entry errors.
    let search = StubSearch::default();
    let resp = service(search, Some(echo_generator())).get_trends().await;
    assert!(resp.items.is_empty());

    let json = serde_json::to_value(&resp).unwrap();
    assert!(json["items"].as_array().unwrap().is_empty());
    assert!(json["last_updated"].is_string());
}

#[tokio::test]
async fn one_failing_entry_does_not_hide_the_others() {
    let search = StubSearch::default().with(
        "ai news",
        vec![
            RawHit::new("b", "https://e.com/b", ""),
            RawHit::new("a", "https://e.com/a", ""),
        ],
    );
    let resp = service(search, Some(echo_generator())).get_trends().await;
    let got: Vec<(&str, &str)> = resp
        .items
        .iter()
        .map(|i| (i.title.as_str(), i.highlight.as_str()))
        .collect();
    assert_eq!(got, vec![("b", "hl-b"), ("a", "hl-a")]);
}

#[tokio::test]
async fn generator_panic_becomes_empty_response() {
    let search = StubSearch::default().with(
        "ai news",
        vec![RawHit::new("x", "https://e.com/x", "")],
    );
    let gen = ScriptedGenerator::new(|_| panic!("backend exploded"));
    let resp = service(search, Some(gen as DynGenerator)).get_trends().await;
    assert!(resp.items.is_empty());
}

#[tokio::test]
async fn unconfigured_service_is_valid_and_empty() {
    let svc = TrendsService::from_config(&AppConfig::default(), default_catalog()).unwrap();
    assert!(!svc.search_configured());
    assert!(!svc.enrichment_configured());
    let resp = svc.get_trends().await;
    assert!(resp.items.is_empty());
}

#[tokio::test]
async fn every_catalog_entry_is_queried() {
    let search = Arc::new(StubSearch::default());
    let svc = TrendsService::new(
        Some(search.clone() as Arc<dyn SearchBackend>),
        Enricher::disabled(),
        catalog(),
    );
    let _ = svc.get_trends().await;
    let mut calls = search.calls.lock().clone();
    calls.sort();
    assert_eq!(calls, vec!["ai news".to_string(), "startup news".to_string()]);
}
