// src/config/mod.rs
//! Service configuration, read once at startup and passed into each component.
//!
//! Missing credentials are not errors: the matching stage degrades to a no-op.

pub mod ai;
pub mod policy;
pub mod search;

use std::path::PathBuf;

use tracing::{info, warn};

pub use ai::AiConfig;
pub use policy::BatchPolicy;
pub use search::SearchConfig;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub ai: AiConfig,
    pub policy: BatchPolicy,
    /// `TRENDS_CATALOG_PATH`: query catalog file overriding the `config/` lookup.
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Build from process environment. Call `dotenvy::dotenv()` first in binaries.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map here).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            search: SearchConfig::from_lookup(&lookup),
            ai: AiConfig::from_lookup(&lookup),
            policy: BatchPolicy::from_lookup(&lookup),
            catalog_path: non_empty(&lookup, "TRENDS_CATALOG_PATH").map(PathBuf::from),
        }
    }

    /// Startup diagnostics. Only presence flags are logged, never key material.
    pub fn log_summary(&self) {
        if self.search.api_key.is_none() {
            warn!("GOOGLE_SEARCH_API_KEY not set");
        }
        if self.search.engine_id.is_none() {
            warn!("GOOGLE_SEARCH_ENGINE_ID not set");
        }
        if self.ai.api_key.is_none() && !self.ai.mock {
            warn!("OPENAI_API_KEY not set");
        }
        info!(
            google_configured = self.search.is_configured(),
            openai_configured = self.ai.api_key.is_some(),
            ai_mock = self.ai.mock,
            region = %self.search.region,
            model = %self.ai.model,
            batch_size = self.policy.batch_size,
            batch_delay_ms = self.policy.inter_batch_delay.as_millis() as u64,
            catalog_path = ?self.catalog_path,
            "config loaded"
        );
    }
}

/// Non-empty, trimmed value for `key`.
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse `key` as a number, falling back to `default` when absent or malformed.
pub(crate) fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    non_empty(lookup, key)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
