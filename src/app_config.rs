use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::default::Default;
use std::path::Path;

use crate::translation::prompts::default_translation_prompts;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Wiki language codes that may be used as source or target
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,

    /// Wiki site settings
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    /// Whether requests must carry an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::Anthropic)
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(&provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(&provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Instruction templates keyed by content kind (`text`, `title`, ...)
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_translation_prompts")]
    pub translation_prompt: HashMap<String, String>,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Whether identical requests are answered from memory
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            translation_prompt: default_translation_prompts(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            cache_enabled: true,
        }
    }
}

/// Wiki site settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WikiConfig {
    /// Wiki family, e.g. "wikipedia"
    #[serde(default = "default_wikiproject")]
    pub wikiproject: String,

    /// Action API endpoint; placeholders: {language}, {wikiproject}
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Wikidata Action API endpoint
    #[serde(default = "default_wikidata_endpoint")]
    pub wikidata_endpoint: String,

    /// Site name of a language in inter-language links; placeholder: {target_language}
    #[serde(default = "default_wikipedia_linksite")]
    pub wikipedia_linksite: String,

    /// Wikidata site id of a language; placeholder: {target_language}
    #[serde(default = "default_wikidata_sitelink")]
    pub wikidata_sitelink: String,

    /// Edit summary for Wikidata sitelink changes; placeholder: {target_language}
    #[serde(default = "default_wikidata_summary")]
    pub wikidata_summary: String,

    /// Edit summary per source language; placeholders: {source_language},
    /// {long_source_language}, {page_title}, {target_language}
    #[serde(default = "default_translation_summary")]
    pub translation_summary: HashMap<String, String>,

    /// Template used to log pages; placeholders: {title}, {text}
    #[serde(default = "default_print_template")]
    pub print_template: String,

    /// Long language names by code
    #[serde(default = "default_language_dict")]
    pub language_dict: HashMap<String, String>,

    /// Literals stripped from translated text, per target language
    #[serde(default)]
    pub non_existing_predefinitions: HashMap<String, Vec<String>>,

    /// User agent sent to the wiki APIs
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            wikiproject: default_wikiproject(),
            api_endpoint: default_api_endpoint(),
            wikidata_endpoint: default_wikidata_endpoint(),
            wikipedia_linksite: default_wikipedia_linksite(),
            wikidata_sitelink: default_wikidata_sitelink(),
            wikidata_summary: default_wikidata_summary(),
            translation_summary: default_translation_summary(),
            print_template: default_print_template(),
            language_dict: default_language_dict(),
            non_existing_predefinitions: HashMap::new(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WikiConfig {
    /// Action API URL of the wiki in `language`
    pub fn api_url(&self, language: &str) -> String {
        self.api_endpoint
            .replace("{language}", language)
            .replace("{wikiproject}", &self.wikiproject)
    }

    /// Wikidata site id of a language, e.g. "ptwiki"
    pub fn sitelink(&self, language: &str) -> String {
        self.wikidata_sitelink.replace("{target_language}", language)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_supported_languages() -> Vec<String> {
    vec!["en".to_string(), "pt".to_string()]
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_true() -> bool {
    true
}

fn default_endpoint(provider: &TranslationProvider) -> String {
    match provider {
        TranslationProvider::Ollama => "http://localhost:11434".to_string(),
        TranslationProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        TranslationProvider::Anthropic => "https://api.anthropic.com".to_string(),
        // LM Studio default server (OpenAI compatible) runs on port 1234 under /v1
        TranslationProvider::LMStudio => "http://localhost:1234/v1".to_string(),
    }
}

fn default_model(provider: &TranslationProvider) -> String {
    match provider {
        TranslationProvider::Ollama => "llama3.1".to_string(),
        TranslationProvider::OpenAI => "gpt-4o-mini".to_string(),
        TranslationProvider::Anthropic => "claude-3-5-haiku-latest".to_string(),
        TranslationProvider::LMStudio => "local-model".to_string(),
    }
}

fn default_wikiproject() -> String {
    "wikipedia".to_string()
}

fn default_api_endpoint() -> String {
    "https://{language}.{wikiproject}.org/w/api.php".to_string()
}

fn default_wikidata_endpoint() -> String {
    "https://www.wikidata.org/w/api.php".to_string()
}

fn default_wikipedia_linksite() -> String {
    crate::wiki::DEFAULT_LINKSITE_TEMPLATE.to_string()
}

fn default_wikidata_sitelink() -> String {
    "{target_language}wiki".to_string()
}

fn default_wikidata_summary() -> String {
    "Adding {target_language} sitelink for a translated article".to_string()
}

fn default_translation_summary() -> HashMap<String, String> {
    let mut summaries = HashMap::new();
    summaries.insert(
        "en".to_string(),
        "Translated from the {long_source_language} article [[:{source_language}:{page_title}]]".to_string(),
    );
    summaries.insert(
        "pt".to_string(),
        "Tradução do artigo em {long_source_language} [[:{source_language}:{page_title}]]".to_string(),
    );
    summaries
}

fn default_print_template() -> String {
    "== {title} ==\n{text}".to_string()
}

fn default_language_dict() -> HashMap<String, String> {
    let mut names = HashMap::new();
    names.insert("en".to_string(), "English".to_string());
    names.insert("pt".to_string(), "Portuguese".to_string());
    names
}

fn default_user_agent() -> String {
    format!("wikitrans/{} (article translation bot)", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load a configuration file, or write and return the defaults when it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.supported_languages.is_empty() {
            return Err(anyhow!("At least one supported language is required"));
        }

        for language in &self.supported_languages {
            if language.trim().is_empty() {
                return Err(anyhow!("Supported languages cannot contain empty codes"));
            }
            // Wiki codes such as "simple" are not ISO codes, so this only warns
            if crate::language_utils::validate_language_code(language).is_err() {
                warn!("'{}' is not an ISO 639 language code", language);
            }
        }

        if !self.wiki.api_endpoint.contains("{language}") {
            return Err(anyhow!("wiki.api_endpoint must contain a {{language}} placeholder"));
        }

        for (field, template) in [
            ("wiki.wikipedia_linksite", &self.wiki.wikipedia_linksite),
            ("wiki.wikidata_sitelink", &self.wiki.wikidata_sitelink),
        ] {
            if !template.contains("{target_language}") {
                return Err(anyhow!("{} must contain a {{target_language}} placeholder", field));
            }
        }

        if self.translation.provider.requires_api_key() && self.translation.get_api_key().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider",
                self.translation.provider.display_name()
            ));
        }

        Ok(())
    }

    /// Whether a language code is part of the supported set
    pub fn is_supported(&self, language: &str) -> bool {
        self.supported_languages.iter().any(|l| l == language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            supported_languages: default_supported_languages(),
            wiki: WikiConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration
    pub fn get_active_provider_config_mut(&mut self) -> Option<&mut ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers.iter_mut()
            .find(|p| p.provider_type == provider_str)
    }

    /// Set the model of the active provider, adding its entry when it has none
    pub fn set_model(&mut self, model: &str) {
        if self.get_active_provider_config().is_none() {
            debug!("No settings for {} provider, adding defaults", self.provider.display_name());
            self.available_providers.push(ProviderConfig::new(self.provider.clone()));
        }
        if let Some(provider_config) = self.get_active_provider_config_mut() {
            provider_config.model = model.to_string();
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        match self.get_active_provider_config() {
            Some(provider_config) if !provider_config.model.is_empty() => provider_config.model.clone(),
            _ => default_model(&self.provider),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        match self.get_active_provider_config() {
            Some(provider_config) if !provider_config.endpoint.is_empty() => provider_config.endpoint.clone(),
            _ => default_endpoint(&self.provider),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|t| *t > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::Ollama),
                ProviderConfig::new(TranslationProvider::OpenAI),
                ProviderConfig::new(TranslationProvider::Anthropic),
                ProviderConfig::new(TranslationProvider::LMStudio),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
