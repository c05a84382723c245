/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::str::FromStr;

use wikitrans::app_config::{Config, LogLevel, TranslationProvider};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.supported_languages, vec!["en", "pt"]);
    assert_eq!(config.translation.provider, TranslationProvider::Ollama);
    assert_eq!(config.translation.get_model(), "llama3.1");
    assert_eq!(config.translation.get_timeout_secs(), 300);
    assert_eq!(config.translation.common.temperature, 0.0);
    assert_eq!(config.wiki.wikipedia_linksite, "wikipedia:{target_language}");
    assert_eq!(config.wiki.print_template, "== {title} ==\n{text}");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test the wiki endpoint and sitelink templates
#[test]
fn test_wikiConfig_templates_shouldRenderLanguage() {
    let config = Config::default();

    assert_eq!(config.wiki.api_url("pt"), "https://pt.wikipedia.org/w/api.php");
    assert_eq!(config.wiki.sitelink("pt"), "ptwiki");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    config.supported_languages.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.wiki.api_endpoint = "https://en.wikipedia.org/w/api.php".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.wiki.wikipedia_linksite = "wikipedia:pt".to_string();
    assert!(config.validate().is_err());

    // Non-ISO wiki codes only warn
    let mut config = Config::default();
    config.supported_languages.push("simple".to_string());
    assert!(config.validate().is_ok());
}

/// Test that providers needing a key are rejected without one
#[test]
fn test_config_validation_withOpenAIWithoutKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::OpenAI;
    assert!(config.validate().is_err());

    if let Some(provider_config) = config.translation.get_active_provider_config_mut() {
        provider_config.api_key = "sk-test".to_string();
    }
    assert!(config.validate().is_ok());
    assert_eq!(config.translation.get_model(), "gpt-4o-mini");
    assert_eq!(config.translation.get_endpoint(), "https://api.openai.com/v1");
}

/// Test that a model override reaches a provider missing from the config
#[test]
fn test_setModel_withProviderWithoutEntry_shouldAddEntry() {
    let mut config = Config::default();
    config.translation.available_providers.clear();
    config.translation.provider = TranslationProvider::LMStudio;

    config.translation.set_model("qwen2.5-7b-instruct");

    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_model(), "qwen2.5-7b-instruct");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:1234/v1");

    config.translation.set_model("llama-3.2-3b");
    assert_eq!(config.translation.available_providers.len(), 1);
    assert_eq!(config.translation.get_model(), "llama-3.2-3b");
}

/// Test provider parsing and naming
#[test]
fn test_translationProvider_fromStr_shouldParseKnownProviders() {
    assert_eq!(TranslationProvider::from_str("OpenAI").unwrap(), TranslationProvider::OpenAI);
    assert_eq!(TranslationProvider::from_str("lmstudio").unwrap(), TranslationProvider::LMStudio);
    assert!(TranslationProvider::from_str("deepl").is_err());
    assert_eq!(TranslationProvider::LMStudio.display_name(), "LM Studio");
    assert_eq!(TranslationProvider::Anthropic.to_string(), "anthropic");
}

/// Test that a partial config file is completed with defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "supported_languages": ["en", "pt", "es"],
        "wiki": { "non_existing_predefinitions": { "pt": ["{{Sem fontes}}"] } },
        "translation": { "provider": "anthropic", "available_providers": [
            { "type": "anthropic", "api_key": "key" }
        ]}
    }"#;

    let config: Config = serde_json::from_str(json)?;

    assert!(config.is_supported("es"));
    assert!(!config.is_supported("fr"));
    assert_eq!(config.wiki.non_existing_predefinitions["pt"], vec!["{{Sem fontes}}"]);
    assert_eq!(config.wiki.wikidata_sitelink, "{target_language}wiki");
    assert_eq!(config.translation.provider, TranslationProvider::Anthropic);
    // Empty model falls back to the provider default
    assert_eq!(config.translation.get_model(), "claude-3-5-haiku-latest");
    assert!(config.translation.common.translation_prompt.contains_key("title"));
    assert!(config.validate().is_ok());
    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.supported_languages, created.supported_languages);
    assert_eq!(loaded.wiki.translation_summary, created.wiki.translation_summary);
    Ok(())
}

/// Test that a malformed config file is reported
#[test]
fn test_loadOrCreate_withMalformedFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}
