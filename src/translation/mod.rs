/*!
 * Translation of wiki pages.
 *
 * - `translator`: the `TextTranslator` port and content kinds
 * - `core`: `TranslationService`, the LLM-backed translator
 * - `cache`: memoization of translated strings
 * - `prompts`: instruction templates per content kind
 * - `links`: cross-language hyperlink resolution
 * - `orchestrator`: the per-page pipeline
 */

pub use self::core::TranslationService;
pub use self::links::{LinkResolver, Resolution, ResolutionMap};
pub use self::orchestrator::{OrchestratorConfig, TranslationOrchestrator, TranslationOutcome};
pub use self::prompts::{PromptCatalog, PromptTemplate};
pub use self::translator::{ContentKind, TextTranslator};

pub mod cache;
pub mod core;
pub mod links;
pub mod orchestrator;
pub mod prompts;
pub mod translator;
