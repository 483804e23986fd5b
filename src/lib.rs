// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod enrich;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod service;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::config::AppConfig;
pub use crate::model::{Category, TrendItem, TrendsResponse};
pub use crate::service::TrendsService;

use anyhow::Context;
use axum::Router;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a tracing subscriber. Best-effort: a no-op if one is already set
/// (the Shuttle runtime installs its own).
///
/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tech_trends=info,warn"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Build the full service from the process environment.
pub fn build_service() -> anyhow::Result<TrendsService> {
    let cfg = AppConfig::from_env();
    cfg.log_summary();
    let catalog = ingest::catalog::load_catalog(cfg.catalog_path.as_deref())
        .context("loading query catalog")?;
    TrendsService::from_config(&cfg, catalog)
}

/// In-process app router (trends routes + `/metrics`), as served by the binary.
pub async fn app() -> anyhow::Result<Router> {
    let service = build_service()?;
    let metrics = metrics::Metrics::init();
    Ok(api::create_router_with_metrics(
        api::AppState::new(service),
        &metrics,
    ))
}
