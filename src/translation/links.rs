/*!
 * Cross-language hyperlink resolution.
 *
 * Each masked hyperlink names a page in the source wiki. The resolver looks
 * that page up and follows its inter-language links to the target wiki. Any
 * failure along the way only affects the link concerned: it resolves to
 * `Unresolved` and the remaining links are still processed.
 */

use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

use crate::markup::Placeholder;
use crate::wiki::WikiClient;

/// Outcome of resolving one hyperlink placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Target-language page name to link to
    Resolved(String),
    /// No equivalent page; the link collapses to its display text
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Placeholder to resolution, ordered by placeholder
pub type ResolutionMap = BTreeMap<Placeholder, Resolution>;

/// Resolves source-language link targets to their target-language equivalents
pub struct LinkResolver<'a> {
    wiki: &'a dyn WikiClient,
}

impl<'a> LinkResolver<'a> {
    pub fn new(wiki: &'a dyn WikiClient) -> Self {
        Self { wiki }
    }

    /// Resolve every hyperlink of a masking pass
    ///
    /// # Arguments
    /// * `hyperlinks` - Placeholder and source page name pairs, in masking order
    /// * `source_language` - Language of the wiki the names belong to
    /// * `target_language` - Language to find equivalents in
    ///
    /// # Returns
    /// * A map holding one entry per placeholder
    pub async fn resolve(
        &self,
        hyperlinks: &[(Placeholder, String)],
        source_language: &str,
        target_language: &str,
    ) -> ResolutionMap {
        let mut resolutions = ResolutionMap::new();
        // Repeated targets within one page are looked up once
        let mut seen: HashMap<&str, Resolution> = HashMap::new();

        for (placeholder, target) in hyperlinks {
            let resolution = match seen.get(target.as_str()) {
                Some(known) => known.clone(),
                None => {
                    let resolution = self.resolve_one(target, source_language, target_language).await;
                    seen.insert(target.as_str(), resolution.clone());
                    resolution
                }
            };
            debug!("{} ({}) -> {:?}", placeholder, target, resolution);
            resolutions.insert(*placeholder, resolution);
        }

        let resolved = resolutions.values().filter(|r| r.is_resolved()).count();
        debug!(
            "Resolved {}/{} links from {} to {}",
            resolved,
            resolutions.len(),
            source_language,
            target_language
        );

        resolutions
    }

    async fn resolve_one(&self, target: &str, source_language: &str, target_language: &str) -> Resolution {
        let page = match self.wiki.fetch_page(target, source_language).await {
            Ok(page) => page,
            Err(e) if e.is_missing() => {
                debug!("Link target '{}' not available: {}", target, e);
                return Resolution::Unresolved;
            }
            Err(e) => {
                warn!("Failed to look up link target '{}': {}", target, e);
                return Resolution::Unresolved;
            }
        };

        match self.wiki.equivalent_page(&page, target_language) {
            Some(link) => Resolution::Resolved(link.in_text_target(target_language)),
            None => Resolution::Unresolved,
        }
    }
}
