/*!
 * Wiki site access.
 *
 * The page pipeline talks to wikis only through the `WikiClient` trait:
 * - `mediawiki`: MediaWiki Action API client over HTTP
 * - `memory`: in-memory wiki used by tests and dry runs
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::WikiError;

pub mod mediawiki;
pub mod memory;

pub use self::mediawiki::MediaWikiClient;
pub use self::memory::InMemoryWiki;

/// Site naming used when none is configured, e.g. `wikipedia:pt`
pub const DEFAULT_LINKSITE_TEMPLATE: &str = "wikipedia:{target_language}";

/// Inter-language link of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangLink {
    /// Site the link points to, e.g. `wikipedia:pt`
    pub site: String,
    /// Language code of the linked wiki
    pub language: String,
    /// Title of the linked page
    pub title: String,
}

impl LangLink {
    pub fn new(site: impl Into<String>, language: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            language: language.into(),
            title: title.into(),
        }
    }

    /// Link target for use inside the target-language article: the language
    /// prefix and brackets are dropped from `[[pt:Title]]`
    pub fn in_text_target(&self, target_language: &str) -> String {
        let rendered = self.to_string();
        let inner = rendered
            .strip_prefix("[[")
            .and_then(|s| s.strip_suffix("]]"))
            .unwrap_or(&rendered);
        let prefix = format!("{}:", target_language);
        inner.strip_prefix(&prefix).unwrap_or(inner).to_string()
    }
}

impl fmt::Display for LangLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[[{}:{}]]", self.language, self.title)
    }
}

/// A wiki page as handled by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    /// Language of the wiki the page belongs to
    pub language: String,
    /// Wikitext body
    pub text: String,
    /// Known inter-language links
    pub langlinks: Vec<LangLink>,
}

impl Page {
    pub fn new(title: impl Into<String>, language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            text: text.into(),
            langlinks: Vec::new(),
        }
    }

    pub fn with_langlink(mut self, link: LangLink) -> Self {
        self.langlinks.push(link);
        self
    }
}

/// Render the site name a target language is expected under
pub fn linksite_for(template: &str, target_language: &str) -> String {
    template.replace("{target_language}", target_language)
}

/// First inter-language link whose site matches the target language
pub fn find_equivalent<'a>(page: &'a Page, linksite_template: &str, target_language: &str) -> Option<&'a LangLink> {
    let site = linksite_for(linksite_template, target_language);
    page.langlinks.iter().find(|link| link.site == site)
}

/// Capability interface for a family of wikis, one per language
#[async_trait]
pub trait WikiClient: Send + Sync {
    /// Fetch an existing page
    ///
    /// # Returns
    /// * `WikiError::PageNotFound` when the page is absent
    /// * `WikiError::WikiUnavailable` when the language is not configured or unreachable
    async fn fetch_page(&self, title: &str, language: &str) -> Result<Page, WikiError>;

    /// Template naming the site of a language, with a `{target_language}` placeholder
    fn linksite_template(&self) -> &str;

    /// Equivalent page of `page` in the target language, if one is linked
    fn equivalent_page(&self, page: &Page, target_language: &str) -> Option<LangLink> {
        find_equivalent(page, self.linksite_template(), target_language).cloned()
    }

    /// Save a page with an edit summary
    async fn save_page(&self, page: &Page, summary: &str) -> Result<(), WikiError>;

    /// Record `new_page` as the sitelink of `original`'s item for the target language
    async fn link_wikidata(&self, original: &Page, new_page: &Page, target_language: &str) -> Result<(), WikiError>;
}
