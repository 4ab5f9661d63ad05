//! Chat-completions client for OpenAI-compatible endpoints.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use smpl_core::{
    application::{
        ApplicationError,
        ports::{EnhanceRequest, LanguageModel, NormalizeRequest},
    },
    domain::ExportTool,
    error::{SmplError, SmplResult},
};
use tracing::{debug, instrument, warn};

use super::{prompts, rate_limit::RateLimiter, unfence};

/// Connection settings for [`OpenAiClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Sampling temperature for normalization and shrinking.
    pub temperature: f32,
    /// Sampling temperature for expansion and enhancement.
    pub expand_temperature: f32,
    pub timeout_secs: u64,
    /// Input beyond this many characters is cut before sending.
    pub max_input_chars: usize,
    pub requests_per_minute: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            temperature: 0.3,
            expand_temperature: 0.4,
            timeout_secs: 60,
            max_input_chars: 10_000,
            requests_per_minute: RateLimiter::DEFAULT_MAX_REQUESTS,
        }
    }
}

/// [`LanguageModel`] over the chat-completions API.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
    api_key: String,
    limiter: RateLimiter,
}

impl OpenAiClient {
    /// Build a client, reading the API key from `config.api_key_env`.
    pub fn new(config: OpenAiConfig) -> SmplResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| SmplError::Configuration {
            message: format!("environment variable {} is not set", config.api_key_env),
        })?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: OpenAiConfig, api_key: impl Into<String>) -> SmplResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SmplError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        let limiter = RateLimiter::new(config.requests_per_minute, RateLimiter::DEFAULT_WINDOW);

        Ok(Self {
            http,
            config,
            api_key: api_key.into(),
            limiter,
        })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Trim and cap user input before it leaves the process.
    fn sanitize<'a>(&self, text: &'a str) -> &'a str {
        let trimmed = text.trim();
        match trimmed.char_indices().nth(self.config.max_input_chars) {
            Some((cut, _)) => {
                warn!(
                    limit = self.config.max_input_chars,
                    "Input exceeds the character limit, truncating"
                );
                &trimmed[..cut]
            }
            None => trimmed,
        }
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        json_mode: bool,
    ) -> SmplResult<String> {
        if let Err(wait) = self.limiter.acquire() {
            return Err(ApplicationError::upstream(format!(
                "rate limit reached, retry in {}s",
                wait.as_secs().max(1)
            ))
            .into());
        }

        let mut body = json!({
            "model": &self.config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "temperature": temperature
        });
        if json_mode {
            body["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApplicationError::upstream(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "Chat completion rejected");
            return Err(ApplicationError::upstream(format!("HTTP {status}: {detail}")).into());
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApplicationError::upstream(format!("unreadable response: {e}")))?;
        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ApplicationError::upstream("model returned no content").into())
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    #[instrument(skip_all, fields(mode = %request.mode, input_kind = %request.input_kind))]
    async fn normalize(&self, request: &NormalizeRequest) -> SmplResult<Value> {
        let text = self.sanitize(&request.text);
        let content = self
            .complete(
                prompts::normalize_system(request.mode),
                &prompts::normalize_user(request, text),
                self.config.temperature,
                true,
            )
            .await?;

        serde_json::from_str(unfence(&content)).map_err(|e| {
            ApplicationError::upstream(format!("model returned malformed JSON: {e}")).into()
        })
    }

    #[instrument(skip_all, fields(tool = %tool))]
    async fn shrink(&self, dsl: &str, tool: ExportTool) -> SmplResult<String> {
        let content = self
            .complete(
                prompts::SHRINK_SYSTEM,
                &prompts::shrink_user(dsl, tool),
                self.config.temperature,
                false,
            )
            .await?;
        Ok(unfence(&content).to_string())
    }

    #[instrument(skip_all, fields(tool = %tool))]
    async fn expand(&self, dsl: &str, tool: ExportTool) -> SmplResult<String> {
        let content = self
            .complete(
                prompts::EXPAND_SYSTEM,
                &prompts::expand_user(dsl, tool),
                self.config.expand_temperature,
                false,
            )
            .await?;
        Ok(unfence(&content).to_string())
    }

    #[instrument(skip_all, fields(mode = %request.mode, enhancements = request.enhancements.len()))]
    async fn enhance(&self, request: &EnhanceRequest) -> SmplResult<String> {
        let text = self.sanitize(&request.text);
        let content = self
            .complete(
                &prompts::enhance_system(request),
                &prompts::enhance_user(request, text),
                self.config.expand_temperature,
                false,
            )
            .await?;
        Ok(unfence(&content).to_string())
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
