/*!
 * Page translation pipeline.
 *
 * One call to `translate_page` walks a page through
 * fetch -> mask -> translate -> resolve links -> restore, holding all
 * intermediate state locally. Publishing the result is a separate,
 * caller-invoked step.
 */

use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use super::links::LinkResolver;
use super::translator::{ContentKind, TextTranslator};
use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::language_utils::long_language_name;
use crate::markup::{self, CleanupRules};
use crate::wiki::{LangLink, Page, WikiClient};

/// Summary used when no template is configured for the source language
pub const DEFAULT_SUMMARY_TEMPLATE: &str =
    "Translated from the {long_source_language} article [[:{source_language}:{page_title}]]";

/// Result of translating one page
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    /// A new target-language page was produced
    Translated {
        /// The page that was translated
        source: Page,
        /// The target-language page
        page: Page,
    },
    /// The source page already links to a page in the target language
    AlreadyTranslated(LangLink),
}

impl TranslationOutcome {
    /// The produced page, if any
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Translated { page, .. } => Some(page),
            Self::AlreadyTranslated(_) => None,
        }
    }
}

/// Read-only settings of the pipeline
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Languages allowed as source or target
    pub supported_languages: Vec<String>,
    /// Literals stripped from translated text, per target language
    pub cleanup: CleanupRules,
    /// Edit summary templates per source language
    pub translation_summary: HashMap<String, String>,
    /// Long language names by code
    pub language_dict: HashMap<String, String>,
    /// Template used to render pages in logs
    pub print_template: String,
}

impl OrchestratorConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            supported_languages: config.supported_languages.clone(),
            cleanup: CleanupRules::new(config.wiki.non_existing_predefinitions.clone()),
            translation_summary: config.wiki.translation_summary.clone(),
            language_dict: config.wiki.language_dict.clone(),
            print_template: config.wiki.print_template.clone(),
        }
    }

    fn is_supported(&self, language: &str) -> bool {
        self.supported_languages.iter().any(|l| l == language)
    }
}

/// Translates wiki pages between languages while keeping their links usable
pub struct TranslationOrchestrator {
    wiki: Arc<dyn WikiClient>,
    translator: Arc<dyn TextTranslator>,
    config: OrchestratorConfig,
}

impl TranslationOrchestrator {
    pub fn new(wiki: Arc<dyn WikiClient>, translator: Arc<dyn TextTranslator>, config: OrchestratorConfig) -> Self {
        Self { wiki, translator, config }
    }

    /// Translate a page into the target language
    ///
    /// # Arguments
    /// * `title` - Title of the page in the source wiki
    /// * `source_language` - Language of the source wiki
    /// * `target_language` - Language to translate into
    /// * `target_title` - Title of the new page; translated from `title` when absent
    ///
    /// # Returns
    /// * `TranslationOutcome::AlreadyTranslated` when the page is already linked to the target wiki
    /// * `TranslationError::Wiki` when the source page cannot be fetched
    /// * `TranslationError::UnsupportedLanguage` when a language is not configured
    pub async fn translate_page(
        &self,
        title: &str,
        source_language: &str,
        target_language: &str,
        target_title: Option<&str>,
    ) -> Result<TranslationOutcome, TranslationError> {
        for language in [source_language, target_language] {
            if !self.config.is_supported(language) {
                return Err(TranslationError::UnsupportedLanguage(language.to_string()));
            }
        }

        let source = self.wiki.fetch_page(title, source_language).await?;
        debug!("Source page:\n{}", self.render_page(&source));

        if let Some(link) = self.wiki.equivalent_page(&source, target_language) {
            info!("'{}' already exists in {} as {}", source.title, target_language, link);
            return Ok(TranslationOutcome::AlreadyTranslated(link));
        }

        let masking = markup::mask(&source.text);
        debug!(
            "Masked {} links and {} references in '{}'",
            masking.hyperlinks.len(),
            masking.references.len(),
            source.title
        );

        let translated_text = self.translator
            .translate(&masking.text, source_language, target_language, &ContentKind::Text)
            .await?;

        let new_title = match target_title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => self.translator
                .translate(&source.title, source_language, target_language, &ContentKind::Title)
                .await?
                .trim()
                .to_string(),
        };
        debug!("Translated page:\n{}", self.render_page(&Page::new(new_title.as_str(), target_language, translated_text.as_str())));

        let resolutions = LinkResolver::new(self.wiki.as_ref())
            .resolve(&masking.hyperlink_map(), source_language, target_language)
            .await;

        let text = markup::restore(&translated_text, &resolutions, target_language, &self.config.cleanup);
        let page = Page::new(new_title, target_language, text);
        debug!("Restored page:\n{}", self.render_page(&page));

        info!("Translated '{}' ({} -> {}) as '{}'", source.title, source_language, target_language, page.title);
        Ok(TranslationOutcome::Translated { source, page })
    }

    /// Edit summary for saving a translated page
    pub fn generate_summary(&self, page_title: &str, source_language: &str, target_language: &str) -> String {
        let template = self.config.translation_summary
            .get(source_language)
            .map(String::as_str)
            .unwrap_or(DEFAULT_SUMMARY_TEMPLATE);

        template
            .replace("{long_source_language}", &long_language_name(source_language, &self.config.language_dict))
            .replace("{source_language}", source_language)
            .replace("{page_title}", page_title)
            .replace("{target_language}", target_language)
    }

    /// Page rendered with the print template
    pub fn render_page(&self, page: &Page) -> String {
        self.config.print_template
            .replace("{title}", &page.title)
            .replace("{text}", &page.text)
    }

    /// Save a translated page and link it to the source page's Wikidata item
    pub async fn publish(&self, source: &Page, page: &Page, summary: &str) -> Result<(), TranslationError> {
        self.wiki.save_page(page, summary).await?;
        self.wiki.link_wikidata(source, page, &page.language).await?;
        info!("Published '{}' to the {} wiki", page.title, page.language);
        Ok(())
    }
}
