/*!
 * Markup restoration after translation.
 *
 * Masked hyperlinks are rewritten with their resolved target-language page, or
 * collapsed to their display text when no equivalent page exists. Reference
 * placeholders are left in place.
 */

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::element::Placeholder;
use crate::translation::links::{Resolution, ResolutionMap};

/// A masked hyperlink as it comes back from translation; the display text may wrap lines
static MASKED_HYPERLINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[\[(LINK\d+)\|(.*?)\]\]").expect("Invalid masked hyperlink regex")
});

/// Literal strings to strip from translated text, keyed by target language
#[derive(Debug, Clone, Default)]
pub struct CleanupRules {
    by_language: HashMap<String, Vec<String>>,
}

impl CleanupRules {
    pub fn new(by_language: HashMap<String, Vec<String>>) -> Self {
        Self { by_language }
    }

    /// Block-list for a language; empty when none is configured
    pub fn for_language(&self, language: &str) -> &[String] {
        self.by_language
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Put resolved link targets back into translated text and apply cleanup rules.
pub fn restore(
    text: &str,
    resolutions: &ResolutionMap,
    target_language: &str,
    rules: &CleanupRules,
) -> String {
    let restored = restore_hyperlinks(text, resolutions);
    cleanup(&restored, rules.for_language(target_language))
}

/// Rewrite every `[[LINKn|display]]` span.
///
/// Resolved placeholders become `[[<resolved>|display]]`. Unresolved ones, and
/// any placeholder missing from the map, collapse to `display`.
pub fn restore_hyperlinks(text: &str, resolutions: &ResolutionMap) -> String {
    MASKED_HYPERLINK_REGEX
        .replace_all(text, |caps: &Captures| {
            let display = &caps[2];
            let resolution = Placeholder::parse(&caps[1])
                .and_then(|placeholder| resolutions.get(&placeholder));

            match resolution {
                Some(Resolution::Resolved(link)) => format!("[[{}|{}]]", link, display),
                Some(Resolution::Unresolved) => display.to_string(),
                None => {
                    debug!("No resolution recorded for {}, keeping display text", &caps[1]);
                    display.to_string()
                }
            }
        })
        .into_owned()
}

/// Remove every block-listed literal from the text.
///
/// Passes repeat until nothing changes, since a removal can join its
/// neighbours into a new occurrence.
pub fn cleanup(text: &str, block_list: &[String]) -> String {
    let mut acc = text.to_string();
    loop {
        let next = block_list
            .iter()
            .filter(|literal| !literal.is_empty())
            .fold(acc.clone(), |current, literal| current.replace(literal.as_str(), ""));
        if next == acc {
            return acc;
        }
        acc = next;
    }
}
