/*!
 * In-memory wiki implementation.
 *
 * Holds pages keyed by language and title, and records saves and Wikidata
 * links instead of sending them anywhere.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use super::{DEFAULT_LINKSITE_TEMPLATE, LangLink, Page, WikiClient, linksite_for};
use crate::errors::WikiError;

/// Wikidata sitelink recorded by `link_wikidata`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSitelink {
    pub original_title: String,
    pub original_language: String,
    pub new_title: String,
    pub target_language: String,
}

/// Wiki family kept entirely in memory
#[derive(Debug)]
pub struct InMemoryWiki {
    pages: HashMap<(String, String), Page>,
    unavailable: HashSet<String>,
    linksite_template: String,
    fetch_log: Mutex<Vec<(String, String)>>,
    saved: Mutex<Vec<(Page, String)>>,
    sitelinks: Mutex<Vec<RecordedSitelink>>,
}

impl Default for InMemoryWiki {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryWiki {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            unavailable: HashSet::new(),
            linksite_template: DEFAULT_LINKSITE_TEMPLATE.to_string(),
            fetch_log: Mutex::new(Vec::new()),
            saved: Mutex::new(Vec::new()),
            sitelinks: Mutex::new(Vec::new()),
        }
    }

    /// Add a page; it replaces any page with the same language and title
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.insert((page.language.clone(), page.title.clone()), page);
        self
    }

    /// Add a page in `language` linked to `target_title` in `target_language`
    pub fn with_linked_page(self, title: &str, language: &str, text: &str, target_language: &str, target_title: &str) -> Self {
        let site = linksite_for(&self.linksite_template, target_language);
        let page = Page::new(title, language, text)
            .with_langlink(LangLink::new(site, target_language, target_title));
        self.with_page(page)
    }

    /// Make every request for this language fail with `WikiUnavailable`
    pub fn with_unavailable_language(mut self, language: &str) -> Self {
        self.unavailable.insert(language.to_string());
        self
    }

    pub fn with_linksite_template(mut self, template: &str) -> Self {
        self.linksite_template = template.to_string();
        self
    }

    /// (language, title) of every fetch, in call order
    pub fn fetches(&self) -> Vec<(String, String)> {
        self.fetch_log.lock().clone()
    }

    /// Pages saved so far with their summaries
    pub fn saved_pages(&self) -> Vec<(Page, String)> {
        self.saved.lock().clone()
    }

    pub fn sitelinks(&self) -> Vec<RecordedSitelink> {
        self.sitelinks.lock().clone()
    }

    fn check_available(&self, language: &str) -> Result<(), WikiError> {
        if self.unavailable.contains(language) {
            return Err(WikiError::WikiUnavailable(language.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WikiClient for InMemoryWiki {
    async fn fetch_page(&self, title: &str, language: &str) -> Result<Page, WikiError> {
        self.fetch_log.lock().push((language.to_string(), title.to_string()));
        self.check_available(language)?;

        self.pages
            .get(&(language.to_string(), title.to_string()))
            .cloned()
            .ok_or_else(|| WikiError::PageNotFound {
                title: title.to_string(),
                language: language.to_string(),
            })
    }

    fn linksite_template(&self) -> &str {
        &self.linksite_template
    }

    async fn save_page(&self, page: &Page, summary: &str) -> Result<(), WikiError> {
        self.check_available(&page.language)?;
        self.saved.lock().push((page.clone(), summary.to_string()));
        Ok(())
    }

    async fn link_wikidata(&self, original: &Page, new_page: &Page, target_language: &str) -> Result<(), WikiError> {
        self.sitelinks.lock().push(RecordedSitelink {
            original_title: original.title.clone(),
            original_language: original.language.clone(),
            new_title: new_page.title.clone(),
            target_language: target_language.to_string(),
        });
        Ok(())
    }
}
