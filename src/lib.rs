/*!
 * # wikitrans - wiki article translation with AI
 *
 * A Rust library for translating wiki articles between language editions
 * without breaking their markup.
 *
 * ## Features
 *
 * - Mask hyperlinks and references before translation
 * - Translate article text and titles using various AI providers:
 *   - Ollama (local LLM)
 *   - OpenAI API and LM Studio
 *   - Anthropic API
 * - Re-point links at the equivalent pages of the target wiki
 * - Save results to the wiki and link them on Wikidata
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `markup`: placeholder masking and restoration of wiki markup
 * - `translation`: the page pipeline:
 *   - `translation::translator`: the `TextTranslator` port
 *   - `translation::core`: LLM-backed translation service
 *   - `translation::links`: cross-language link resolution
 *   - `translation::orchestrator`: fetch, mask, translate, resolve, restore
 * - `wiki`: the `WikiClient` capability, the MediaWiki client and an in-memory wiki
 * - `providers`: Client implementations for various LLM providers
 * - `app_config`: Configuration management
 * - `app_controller`: job list processing
 * - `file_utils`: job list parsing and page persistence
 * - `language_utils`: language code utilities
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod markup;
pub mod providers;
pub mod translation;
pub mod wiki;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, TranslationError, WikiError};
pub use markup::{MaskingResult, Placeholder, mask, restore};
pub use translation::{TextTranslator, TranslationOrchestrator, TranslationOutcome, TranslationService};
pub use wiki::{LangLink, Page, WikiClient};
