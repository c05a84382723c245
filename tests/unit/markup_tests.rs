/*!
 * Tests for markup masking and restoration
 */

use std::collections::HashSet;

use wikitrans::markup::{
    self, CleanupRules, MarkupElement, MarkupKind, Placeholder, cleanup, mask, restore, translate_element,
};
use wikitrans::translation::{Resolution, ResolutionMap};

use crate::common::ATLANTIC_OCEAN_TEXT;

fn resolve_all(result: &markup::MaskingResult) -> ResolutionMap {
    result
        .hyperlink_map()
        .into_iter()
        .map(|(placeholder, target)| (placeholder, Resolution::Resolved(format!("pt:{}", target))))
        .collect()
}

/// Test the documented hyperlink example
#[test]
fn test_mask_withBareAndPipedLinks_shouldMatchDocumentedExample() {
    let result = mask("[[A]] text [[B|C]]");

    assert_eq!(result.text, "[[LINK0|A]] text [[LINK1|C]]");
    assert_eq!(
        result.hyperlink_map(),
        vec![
            (Placeholder::hyperlink(0), "A".to_string()),
            (Placeholder::hyperlink(1), "B".to_string()),
        ]
    );
}

/// Test the documented reference example
#[test]
fn test_mask_withFullAndSelfClosingRefs_shouldMatchDocumentedExample() {
    let result = mask("<ref>X</ref><ref name=\"n\"/>");

    assert_eq!(result.text, "<REF0><REF1>");
    assert_eq!(
        result.reference_map(),
        vec![
            (Placeholder::reference(0), "<ref>X</ref>".to_string()),
            (Placeholder::reference(1), "<ref name=\"n\"/>".to_string()),
        ]
    );
}

/// Test that every detected span gets exactly one distinct placeholder
#[test]
fn test_mask_withArticle_shouldBeInjectiveAndTotal() {
    let result = mask(ATLANTIC_OCEAN_TEXT);

    assert_eq!(result.hyperlinks.len(), 3);
    assert_eq!(result.references.len(), 2);
    assert_eq!(result.len(), 5);

    let placeholders: HashSet<Placeholder> = result
        .hyperlinks
        .iter()
        .chain(result.references.iter())
        .map(|masked| masked.placeholder)
        .collect();
    assert_eq!(placeholders.len(), result.len());

    for placeholder in &placeholders {
        assert!(result.text.contains(&placeholder.to_string()));
    }
    assert!(!result.text.contains("<ref"));
}

/// Test that a back-reference repeating a name gets its own placeholder
#[test]
fn test_mask_withBackReference_shouldAllocateNewOrdinal() {
    let result = mask("<ref name=\"a\">Source</ref> and again<ref name=\"a\"/>");

    assert_eq!(result.references.len(), 2);
    assert_eq!(result.references[1].placeholder, Placeholder::reference(1));
    assert_eq!(result.references[1].text(), "<ref name=\"a\"/>");
}

/// Test that the masked elements keep target and display apart
#[test]
fn test_mask_withPipedLink_shouldRecordTargetAndDisplay() {
    let result = mask("see [[Coastline of Brazil|the coast]]");

    assert_eq!(
        result.hyperlinks[0].element,
        MarkupElement::Hyperlink {
            target: "Coastline of Brazil".to_string(),
            display: "the coast".to_string(),
        }
    );
    assert_eq!(result.hyperlinks[0].element.kind(), MarkupKind::Hyperlink);
}

/// Test that restoring with every link resolved leaves no hyperlink placeholder
#[test]
fn test_restore_withFullResolution_shouldLeaveNoLinkPlaceholders() {
    let result = mask(ATLANTIC_OCEAN_TEXT);
    let restored = restore(&result.text, &resolve_all(&result), "pt", &CleanupRules::default());

    assert!(!restored.contains("LINK"));
    assert!(restored.contains("[[pt:Brazil|Brazil]]"));
    assert!(restored.contains("[[pt:Coastline of Brazil|Brazilian coast]]"));
}

/// Test that an empty resolution map collapses every link to its display text
#[test]
fn test_restore_withEmptyMap_shouldCollapseLinksToDisplayText() {
    let result = mask("[[A]] text [[B|C]]");
    let restored = restore(&result.text, &ResolutionMap::new(), "pt", &CleanupRules::default());

    assert_eq!(restored, "A text C");
}

/// Test that reference placeholders survive restoration
#[test]
fn test_restore_withReferences_shouldKeepReferencePlaceholders() {
    let result = mask("Fact.<ref>Source</ref>");
    let restored = restore(&result.text, &ResolutionMap::new(), "pt", &CleanupRules::default());

    assert_eq!(restored, "Fact.<REF0>");
}

/// Test that cleanup only touches block-listed literals and is idempotent
#[test]
fn test_cleanup_withBlockList_shouldBeIdempotent() {
    let block_list = vec!["{{Sem fontes}}".to_string(), "{{Esboço}}".to_string()];
    let text = "{{Sem fontes}}O oceano.{{Esboço}} Fim.";

    let once = cleanup(text, &block_list);
    let twice = cleanup(&once, &block_list);

    assert_eq!(once, "O oceano. Fim.");
    assert_eq!(once, twice);
}

/// Test that cleanup rules are applied per target language
#[test]
fn test_restore_withCleanupRules_shouldApplyTargetLanguageOnly() {
    let mut by_language = std::collections::HashMap::new();
    by_language.insert("pt".to_string(), vec!["{{Sem fontes}}".to_string()]);
    let rules = CleanupRules::new(by_language);

    assert_eq!(restore("{{Sem fontes}}Texto", &ResolutionMap::new(), "pt", &rules), "Texto");
    assert_eq!(restore("{{Sem fontes}}Text", &ResolutionMap::new(), "en", &rules), "{{Sem fontes}}Text");
}

/// Test that element translation leaves both variants unchanged
#[test]
fn test_translateElement_withAnyVariant_shouldReturnElementUnchanged() {
    let link = MarkupElement::Hyperlink { target: "Brazil".to_string(), display: "Brazil".to_string() };
    let reference = MarkupElement::Reference { markup: "<ref>X</ref>".to_string() };

    assert_eq!(translate_element(&link, "pt"), link);
    assert_eq!(translate_element(&reference, "pt"), reference);
}
