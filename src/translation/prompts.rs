/*!
 * Instruction templates for wiki translation requests.
 *
 * Templates are keyed by content kind (`text`, `title`, or any caller-defined
 * name). A kind without a template falls back to a generic instruction.
 */

use std::collections::HashMap;

use super::translator::ContentKind;

/// System prompt template with `{source_language}` / `{target_language}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Fallback used when no template is configured for a content kind.
    pub const GENERIC: &'static str = "Translate the text from {source_language} to {target_language}.";

    /// Default instruction for article bodies.
    pub const ARTICLE_TEXT: &'static str = r#"You are translating a wiki article written in wikitext from {source_language} to {target_language}.

- Translate the prose and the visible text of links.
- Tokens such as LINK0 and REF0 are placeholders: copy them exactly, never translate, renumber or drop them.
- Keep the wikitext structure ([[...|...]], '''bold''', ''italic'', headings, templates) unchanged.
- Respond with the translated wikitext only, without explanations."#;

    /// Default instruction for article titles.
    pub const ARTICLE_TITLE: &'static str = "Translate this wiki article title from {source_language} to {target_language}. Respond with the translated title only, without quotes or explanations.";

    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    pub fn generic() -> Self {
        Self::new(Self::GENERIC)
    }

    /// Render the template with the given languages.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::generic()
    }
}

/// Templates per content kind
#[derive(Debug, Clone, Default)]
pub struct PromptCatalog {
    templates: HashMap<String, PromptTemplate>,
}

impl PromptCatalog {
    pub fn new(templates: &HashMap<String, String>) -> Self {
        Self {
            templates: templates
                .iter()
                .map(|(kind, template)| (kind.clone(), PromptTemplate::new(template)))
                .collect(),
        }
    }

    /// Template for a kind, or the generic instruction when none is configured
    pub fn template_for(&self, kind: &ContentKind) -> PromptTemplate {
        self.templates
            .get(kind.as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// Rendered system prompt for a request
    pub fn system_prompt(&self, kind: &ContentKind, source_language: &str, target_language: &str) -> String {
        self.template_for(kind).render(source_language, target_language)
    }
}

/// Templates written into a fresh configuration file
pub fn default_translation_prompts() -> HashMap<String, String> {
    let mut prompts = HashMap::new();
    prompts.insert(ContentKind::Text.as_str().to_string(), PromptTemplate::ARTICLE_TEXT.to_string());
    prompts.insert(ContentKind::Title.as_str().to_string(), PromptTemplate::ARTICLE_TITLE.to_string());
    prompts
}
