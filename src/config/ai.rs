// src/config/ai.rs
use std::time::Duration;

use super::{non_empty, parsed_or};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Highlight generation backend settings.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout: Duration,
    /// `AI_TEST_MODE=mock`: deterministic offline generator.
    pub mock: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            temperature: 0.7,
            timeout: Duration::from_secs(30),
            mock: false,
        }
    }
}

impl AiConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let temperature = parsed_or(lookup, "OPENAI_TEMPERATURE", d.temperature);
        Self {
            api_key: non_empty(lookup, "OPENAI_API_KEY"),
            model: non_empty(lookup, "OPENAI_MODEL").unwrap_or(d.model),
            base_url: non_empty(lookup, "OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(d.base_url),
            temperature: if (0.0..=2.0).contains(&temperature) {
                temperature
            } else {
                d.temperature
            },
            timeout: Duration::from_secs(parsed_or(lookup, "OPENAI_TIMEOUT_SECS", 30u64)),
            mock: non_empty(lookup, "AI_TEST_MODE").is_some_and(|v| v.eq_ignore_ascii_case("mock")),
        }
    }

    /// A key is present, or the mock generator is requested.
    pub fn is_configured(&self) -> bool {
        self.mock || self.api_key.is_some()
    }
}
