/*!
 * Markup masking ahead of translation.
 *
 * Every hyperlink and reference span is replaced with a placeholder token kept
 * inside its syntactic shell, so the translation backend sees `[[LINK0|Atlantic Ocean]]`
 * and `<REF0>` instead of page names and citation markup.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::element::{MarkupElement, MarkupKind, MaskedElement, Placeholder};

/// Shortest `[[...]]` span on a single line
static HYPERLINK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[(.+?)\]\]").expect("Invalid hyperlink regex")
});

/// Self-closing reference, or an opening tag through the first closing tag
static REFERENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<ref(?:\s+name\s*=\s*"[^"]*")?\s*/>|<ref(?:\s+name\s*=\s*"[^"]*")?\s*>.*?</ref>"#).expect("Invalid reference regex")
});

/// Output of a single masking pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskingResult {
    /// Text with every detected span replaced by its placeholder
    pub text: String,

    /// Masked hyperlinks in order of appearance
    pub hyperlinks: Vec<MaskedElement>,

    /// Masked references in order of appearance
    pub references: Vec<MaskedElement>,
}

impl MaskingResult {
    /// Placeholder to target page name, in order of appearance
    pub fn hyperlink_map(&self) -> Vec<(Placeholder, String)> {
        self.hyperlinks
            .iter()
            .map(|masked| (masked.placeholder, masked.text().to_string()))
            .collect()
    }

    /// Placeholder to full reference markup, in order of appearance
    pub fn reference_map(&self) -> Vec<(Placeholder, String)> {
        self.references
            .iter()
            .map(|masked| (masked.placeholder, masked.text().to_string()))
            .collect()
    }

    /// Total number of masked spans
    pub fn len(&self) -> usize {
        self.hyperlinks.len() + self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hands out ordinals for one kind within one masking pass
struct OrdinalCounter {
    kind: MarkupKind,
    next: usize,
}

impl OrdinalCounter {
    fn new(kind: MarkupKind) -> Self {
        Self { kind, next: 0 }
    }

    fn allocate(&mut self) -> Placeholder {
        let placeholder = Placeholder::new(self.kind, self.next);
        self.next += 1;
        placeholder
    }
}

/// Mask references, then hyperlinks, in the given text.
///
/// References go first so their recorded markup is the original span, links
/// inside a citation included. Counters live inside this call, so masking the
/// same text twice yields the same result and independent pages never share
/// ordinals.
pub fn mask(text: &str) -> MaskingResult {
    let (text, references) = mask_references(text);
    let (text, hyperlinks) = mask_hyperlinks(&text);

    MaskingResult {
        text,
        hyperlinks,
        references,
    }
}

/// Replace each `[[Target|display]]` / `[[Target]]` with `[[LINKn|display]]`
pub fn mask_hyperlinks(text: &str) -> (String, Vec<MaskedElement>) {
    let mut counter = OrdinalCounter::new(MarkupKind::Hyperlink);
    let mut masked = Vec::new();

    let rewritten = HYPERLINK_REGEX.replace_all(text, |caps: &Captures| {
        let inner = &caps[1];
        let (target, display) = match inner.split_once('|') {
            Some((target, display)) => (target, display),
            None => (inner, inner),
        };

        let placeholder = counter.allocate();
        masked.push(MaskedElement::new(
            placeholder,
            MarkupElement::Hyperlink {
                target: target.to_string(),
                display: display.to_string(),
            },
        ));

        format!("[[{}|{}]]", placeholder, display)
    });

    (rewritten.into_owned(), masked)
}

/// Replace each reference span with `<REFn>`
pub fn mask_references(text: &str) -> (String, Vec<MaskedElement>) {
    let mut counter = OrdinalCounter::new(MarkupKind::Reference);
    let mut masked = Vec::new();

    let rewritten = REFERENCE_REGEX.replace_all(text, |caps: &Captures| {
        let placeholder = counter.allocate();
        masked.push(MaskedElement::new(
            placeholder,
            MarkupElement::Reference {
                markup: caps[0].to_string(),
            },
        ));

        format!("<{}>", placeholder)
    });

    (rewritten.into_owned(), masked)
}
