use std::fmt;

/// Kind of non-prose markup that gets masked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkupKind {
    /// `[[Target]]` or `[[Target|display]]`
    Hyperlink,
    /// `<ref>...</ref>` or `<ref name="..."/>`
    Reference,
}

impl MarkupKind {
    /// Token prefix used for placeholders of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Hyperlink => "LINK",
            Self::Reference => "REF",
        }
    }
}

/// Placeholder token standing in for masked markup, e.g. `LINK3` or `REF1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placeholder {
    kind: MarkupKind,
    ordinal: usize,
}

impl Placeholder {
    pub fn new(kind: MarkupKind, ordinal: usize) -> Self {
        Self { kind, ordinal }
    }

    pub fn hyperlink(ordinal: usize) -> Self {
        Self::new(MarkupKind::Hyperlink, ordinal)
    }

    pub fn reference(ordinal: usize) -> Self {
        Self::new(MarkupKind::Reference, ordinal)
    }

    pub fn kind(&self) -> MarkupKind {
        self.kind
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Parse a token such as `LINK12` back into a placeholder
    pub fn parse(token: &str) -> Option<Self> {
        let (kind, digits) = if let Some(rest) = token.strip_prefix(MarkupKind::Hyperlink.prefix()) {
            (MarkupKind::Hyperlink, rest)
        } else if let Some(rest) = token.strip_prefix(MarkupKind::Reference.prefix()) {
            (MarkupKind::Reference, rest)
        } else {
            return None;
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse().ok().map(|ordinal| Self::new(kind, ordinal))
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.ordinal)
    }
}

/// Original content hidden behind a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupElement {
    /// A wiki link; `display` equals `target` for bare links
    Hyperlink {
        target: String,
        display: String,
    },
    /// The full inline reference markup
    Reference {
        markup: String,
    },
}

impl MarkupElement {
    pub fn kind(&self) -> MarkupKind {
        match self {
            Self::Hyperlink { .. } => MarkupKind::Hyperlink,
            Self::Reference { .. } => MarkupKind::Reference,
        }
    }

    /// Text recorded for the element: the link target, or the whole reference markup
    pub fn text(&self) -> &str {
        match self {
            Self::Hyperlink { target, .. } => target,
            Self::Reference { markup } => markup,
        }
    }
}

/// Placeholder paired with the markup it replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedElement {
    pub placeholder: Placeholder,
    pub element: MarkupElement,
}

impl MaskedElement {
    pub fn new(placeholder: Placeholder, element: MarkupElement) -> Self {
        Self { placeholder, element }
    }

    pub fn text(&self) -> &str {
        self.element.text()
    }
}

/// Translate a masked element into the target language.
///
/// Neither hyperlinks nor references carry translatable content of their own:
/// link targets are re-resolved through inter-language links instead, and
/// references are kept as-is. The element is returned unchanged for both.
pub fn translate_element(element: &MarkupElement, _target_language: &str) -> MarkupElement {
    match element {
        MarkupElement::Hyperlink { .. } | MarkupElement::Reference { .. } => element.clone(),
    }
}
