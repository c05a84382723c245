/*!
 * Core translation service implementation.
 *
 * This module contains the `TranslationService`, which implements the
 * `TextTranslator` port on top of the configured LLM provider. The system
 * prompt is picked by content kind, and results are memoized in a
 * `TranslationCache`.
 */

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, info};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

use super::cache::TranslationCache;
use super::prompts::PromptCatalog;
use super::translator::{ContentKind, TextTranslator};
use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::ollama::{ChatRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Token usage statistics for tracking API consumption
#[derive(Debug, Clone)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,
    /// Number of completion tokens
    pub completion_tokens: u64,
    /// Number of provider requests made
    pub requests: u64,
    /// Total time spent on API requests
    pub api_duration: Duration,
    /// Provider name
    pub provider: String,
    /// Model name
    pub model: String,
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            requests: 0,
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Record one provider request
    pub fn record(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>, duration: Duration) {
        self.requests += 1;
        self.prompt_tokens += prompt_tokens.unwrap_or(0);
        self.completion_tokens += completion_tokens.unwrap_or(0);
        self.api_duration += duration;
    }

    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token usage ({} / {}): {} requests, {} prompt + {} completion = {} tokens in {:.1}s",
            self.provider,
            self.model,
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens(),
            self.api_duration.as_secs_f64()
        )
    }
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// Ollama LLM service
    Ollama { client: Ollama },
    /// OpenAI API service
    OpenAI { client: OpenAI },
    /// LM Studio local server (OpenAI-compatible)
    LMStudio { client: OpenAI },
    /// Anthropic API service
    Anthropic { client: Anthropic },
}

/// Text translation backed by an LLM provider
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,
    /// Configuration for the translation service
    pub config: TranslationConfig,
    /// System prompt templates per content kind
    prompts: PromptCatalog,
    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,
    /// Accumulated provider usage
    usage: Mutex<TokenUsageStats>,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let timeout = config.get_timeout_secs();
        let endpoint = config.get_endpoint();

        let provider = match config.provider {
            ConfigTranslationProvider::Ollama => {
                if endpoint.is_empty() {
                    return Err(anyhow!("Endpoint cannot be empty"));
                }
                TranslationProviderImpl::Ollama {
                    client: Ollama::new(endpoint, timeout),
                }
            }
            ConfigTranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new(config.get_api_key(), endpoint, timeout),
            },
            ConfigTranslationProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };
                TranslationProviderImpl::LMStudio {
                    client: OpenAI::new(api_key, endpoint, timeout),
                }
            }
            ConfigTranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new(config.get_api_key(), endpoint, config.get_model(), timeout),
            },
        };

        let usage = TokenUsageStats::with_provider_info(
            config.provider.display_name().to_string(),
            config.get_model(),
        );

        Ok(Self {
            provider,
            prompts: PromptCatalog::new(&config.common.translation_prompt),
            cache: TranslationCache::new(config.common.cache_enabled),
            usage: Mutex::new(usage),
            config,
        })
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<()> {
        info!("Testing connection to {} with model {}",
              self.config.provider.display_name(), self.config.get_model());

        let result = match &self.provider {
            TranslationProviderImpl::Ollama { client } => client.test_connection().await,
            TranslationProviderImpl::OpenAI { client } | TranslationProviderImpl::LMStudio { client } => {
                client.test_connection().await
            }
            TranslationProviderImpl::Anthropic { client } => client.test_connection().await,
        };

        result.map_err(|e| anyhow!("Failed to connect to {}: {}", self.config.provider.display_name(), e))
    }

    /// Snapshot of the accumulated provider usage
    pub fn usage(&self) -> TokenUsageStats {
        self.usage.lock().clone()
    }

    /// Send one request to the configured provider
    async fn complete(&self, system_prompt: &str, text: &str) -> Result<String, ProviderError> {
        let start_time = Instant::now();
        let model = self.config.get_model();
        let temperature = self.config.common.temperature;
        let max_tokens = self.config.common.max_tokens;

        let (translated, prompt_tokens, completion_tokens) = match &self.provider {
            TranslationProviderImpl::Ollama { client } => {
                let request = ChatRequest::new(model)
                    .add_message("system", system_prompt)
                    .add_message("user", text)
                    .temperature(temperature)
                    .max_tokens(max_tokens);

                let response = client.complete(request).await?;
                (Ollama::extract_text(&response), response.prompt_eval_count, response.eval_count)
            }
            TranslationProviderImpl::OpenAI { client } | TranslationProviderImpl::LMStudio { client } => {
                let request = OpenAIRequest::new(model)
                    .add_message("system", system_prompt)
                    .add_message("user", text)
                    .temperature(temperature)
                    .max_tokens(max_tokens);

                let response = client.complete(request).await?;
                let usage = response.usage.as_ref()
                    .map(|u| (Some(u.prompt_tokens as u64), Some(u.completion_tokens as u64)))
                    .unwrap_or((None, None));
                (OpenAI::extract_text(&response), usage.0, usage.1)
            }
            TranslationProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(model, max_tokens)
                    .system(system_prompt)
                    .add_message("user", text)
                    .temperature(temperature);

                let response = client.complete(request).await?;
                (
                    Anthropic::extract_text(&response),
                    Some(response.usage.input_tokens as u64),
                    Some(response.usage.output_tokens as u64),
                )
            }
        };

        let duration = start_time.elapsed();
        debug!("{} response received in {:?}", self.config.provider.display_name(), duration);
        self.usage.lock().record(prompt_tokens, completion_tokens, duration);

        Ok(translated)
    }
}

#[async_trait]
impl TextTranslator for TranslationService {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        kind: &ContentKind,
    ) -> Result<String, TranslationError> {
        // Nothing to translate
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        if let Some(cached) = self.cache.get(text, source_language, target_language, kind) {
            return Ok(cached);
        }

        let system_prompt = self.prompts.system_prompt(kind, source_language, target_language);
        let translated = self.complete(&system_prompt, text).await?;
        let translated = translated.trim().to_string();

        if translated.is_empty() {
            return Err(TranslationError::Backend(format!(
                "{} returned an empty {} translation",
                self.config.provider.display_name(),
                kind
            )));
        }

        self.cache.store(text, source_language, target_language, kind, &translated);
        Ok(translated)
    }

    fn name(&self) -> &str {
        self.config.provider.display_name()
    }
}
