//! AI adapter: text-generation provider abstraction used for highlights.
//!
//! Providers return the raw reply text. Interpreting it (list vs. lines) is the
//! enricher's job, so a provider only fails on transport or HTTP errors.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;

/// One chat request: system instruction + user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

/// Trait object used by the enricher (and tests).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, req: &CompletionRequest) -> Result<String>;
    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Convenient alias used by callers.
pub type DynGenerator = Arc<dyn TextGenerator>;

/// Factory: build a generator according to config.
///
/// * `mock` → deterministic `MockProvider`.
/// * API key present → `OpenAiProvider`.
/// * Otherwise `None`: enrichment is skipped.
pub fn build_generator(cfg: &AiConfig) -> Result<Option<DynGenerator>> {
    if cfg.mock {
        let mock: DynGenerator = Arc::new(MockProvider);
        return Ok(Some(mock));
    }
    match cfg.api_key.as_deref() {
        Some(_) => {
            let provider: DynGenerator = Arc::new(OpenAiProvider::new(cfg)?);
            Ok(Some(provider))
        }
        None => Ok(None),
    }
}

// ------------------------------------------------------------
// OpenAI
// ------------------------------------------------------------

/// OpenAI provider (uses Chat Completions API).
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(cfg: &AiConfig) -> Result<Self> {
        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY missing"))?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("tech-trends-service/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(std::time::Duration::from_secs(4))
            .timeout(cfg.timeout)
            .build()
            .context("building openai http client")?;
        Ok(Self {
            http,
            api_key,
            model: cfg.model.clone(),
            base_url: cfg.base_url.clone(),
            temperature: cfg.temperature,
        })
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatReq<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResp {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<String> {
        let body = ChatReq {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: &req.system,
                },
                Msg {
                    role: "user",
                    content: &req.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: req.max_tokens,
        };

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("openai request")?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("openai HTTP error {}", status.as_u16()));
        }
        let parsed: ChatResp = resp.json().await.context("decoding openai response")?;
        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// ------------------------------------------------------------
// Mock
// ------------------------------------------------------------

/// Offline provider for local runs: echoes each `Title:` line of the payload.
/// Batched payloads get a JSON array, single ones plain text.
#[derive(Clone, Default)]
pub struct MockProvider;

impl MockProvider {
    fn highlight_for(title: &str) -> String {
        format!("Mock highlight: {title}")
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<String> {
        let titles: Vec<&str> = req
            .user
            .lines()
            .filter_map(|l| l.strip_prefix("Title: "))
            .collect();
        if req.user.starts_with("Article ") {
            let out: Vec<String> = titles.iter().map(|t| Self::highlight_for(t)).collect();
            return Ok(serde_json::to_string(&out)?);
        }
        Ok(titles
            .first()
            .map(|t| Self::highlight_for(t))
            .unwrap_or_default())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
