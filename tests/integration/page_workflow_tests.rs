/*!
 * End-to-end tests of the page translation pipeline
 */

use std::sync::Arc;

use wikitrans::errors::{TranslationError, WikiError};
use wikitrans::providers::mock::MockTranslator;
use wikitrans::translation::{ContentKind, TranslationOutcome};
use wikitrans::wiki::{InMemoryWiki, Page};

use crate::common::{self, ATLANTIC_OCEAN_TEXT};

const EXPECTED_ATLANTIC_TEXT: &str = "O '''Oceano Atlântico''' banha o [[Brasil|Brasil]] ao longo da [[Litoral do Brasil|costa brasileira]].<REF0> Também chega à Terra de Ninguém.<REF1>";

/// Test the full pipeline on an article with resolvable and unresolvable links
#[tokio::test]
async fn test_translatePage_withAtlanticOcean_shouldRestoreResolvedLinks() {
    common::init_logging();
    let wiki = Arc::new(common::atlantic_wiki());
    let translator = Arc::new(common::atlantic_translator());
    let orchestrator = common::orchestrator(wiki.clone(), translator.clone());

    let outcome = orchestrator
        .translate_page("Atlantic Ocean", "en", "pt", None)
        .await
        .unwrap();

    let TranslationOutcome::Translated { source, page } = outcome else {
        panic!("expected a translated page");
    };
    assert_eq!(source.title, "Atlantic Ocean");
    assert_eq!(page.title, "Oceano Atlântico");
    assert_eq!(page.language, "pt");
    assert_eq!(page.text, EXPECTED_ATLANTIC_TEXT);

    let kinds: Vec<ContentKind> = translator.requests().into_iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![ContentKind::Text, ContentKind::Title]);
    assert!(translator.requests()[0].text.contains("[[LINK0|Brazil]]"));
}

/// Test that an identity translation keeps display texts and re-points every link
#[tokio::test]
async fn test_translatePage_withIdentityTranslator_shouldResolveBothLinks() {
    let wiki = Arc::new(
        InMemoryWiki::new()
            .with_page(Page::new(
                "Geography of Brazil",
                "en",
                "Bathed by the [[Atlantic Ocean]], Brazil has a [[Coastline_of_Brazil|coastline]]",
            ))
            .with_linked_page("Atlantic Ocean", "en", "", "pt", "Oceano Atlântico")
            .with_linked_page("Coastline_of_Brazil", "en", "", "pt", "Litoral do Brasil"),
    );
    let orchestrator = common::orchestrator(wiki, Arc::new(MockTranslator::working()));

    let outcome = orchestrator
        .translate_page("Geography of Brazil", "en", "pt", None)
        .await
        .unwrap();

    let text = &outcome.page().unwrap().text;
    assert!(text.contains("[[Oceano Atlântico|Atlantic Ocean]]"));
    assert!(text.contains("[[Litoral do Brasil|coastline]]"));
    assert!(!text.contains("LINK"));
}

/// Test that an explicit target title skips title translation
#[tokio::test]
async fn test_translatePage_withExplicitTitle_shouldNotTranslateTitle() {
    let translator = Arc::new(common::atlantic_translator());
    let orchestrator = common::orchestrator(Arc::new(common::atlantic_wiki()), translator.clone());

    let outcome = orchestrator
        .translate_page("Atlantic Ocean", "en", "pt", Some("  Atlântico  "))
        .await
        .unwrap();

    assert_eq!(outcome.page().map(|p| p.title.as_str()), Some("Atlântico"));
    assert_eq!(translator.request_count(), 1);
}

/// Test that a page already linked to the target wiki is not translated
#[tokio::test]
async fn test_translatePage_withExistingLanglink_shouldReportAlreadyTranslated() {
    let wiki = Arc::new(InMemoryWiki::new().with_linked_page("Brazil", "en", "Brazil is a country.", "pt", "Brasil"));
    let translator = Arc::new(MockTranslator::working());
    let orchestrator = common::orchestrator(wiki, translator.clone());

    let outcome = orchestrator.translate_page("Brazil", "en", "pt", None).await.unwrap();

    match outcome {
        TranslationOutcome::AlreadyTranslated(link) => assert_eq!(link.title, "Brasil"),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(translator.request_count(), 0);
}

/// Test that a missing source page is reported as a wiki error
#[tokio::test]
async fn test_translatePage_withMissingPage_shouldPropagatePageNotFound() {
    let orchestrator = common::orchestrator(Arc::new(InMemoryWiki::new()), Arc::new(MockTranslator::working()));

    let error = orchestrator.translate_page("Atlantis", "en", "pt", None).await.unwrap_err();

    assert!(matches!(error, TranslationError::Wiki(WikiError::PageNotFound { .. })));
}

/// Test that unsupported languages are refused before any wiki call
#[tokio::test]
async fn test_translatePage_withUnsupportedLanguage_shouldFailWithoutFetching() {
    let wiki = Arc::new(common::atlantic_wiki());
    let orchestrator = common::orchestrator(wiki.clone(), Arc::new(MockTranslator::working()));

    let error = orchestrator.translate_page("Atlantic Ocean", "en", "fr", None).await.unwrap_err();

    assert!(matches!(error, TranslationError::UnsupportedLanguage(ref language) if language == "fr"));
    assert!(wiki.fetches().is_empty());
}

/// Test that translator failures abort the page
#[tokio::test]
async fn test_translatePage_withFailingTranslator_shouldPropagateProviderError() {
    let orchestrator = common::orchestrator(Arc::new(common::atlantic_wiki()), Arc::new(MockTranslator::failing()));

    let error = orchestrator.translate_page("Atlantic Ocean", "en", "pt", None).await.unwrap_err();

    assert!(matches!(error, TranslationError::Provider(_)));
}

/// Test that target-language cleanup rules are applied to the restored text
#[tokio::test]
async fn test_translatePage_withCleanupLiteral_shouldStripIt() {
    let translator = Arc::new(
        MockTranslator::working()
            .with_translation("A [[LINK0|sea]].", "{{Sem fontes}}Um [[LINK0|mar]].")
            .with_translation("Sea", "Mar"),
    );
    let wiki = Arc::new(
        InMemoryWiki::new()
            .with_page(Page::new("Sea", "en", "A [[Pacific Ocean|sea]]."))
            .with_linked_page("Pacific Ocean", "en", "", "pt", "Oceano Pacífico"),
    );
    let orchestrator = common::orchestrator(wiki, translator);

    let outcome = orchestrator.translate_page("Sea", "en", "pt", None).await.unwrap();

    let page = outcome.page().unwrap();
    assert_eq!(page.title, "Mar");
    assert_eq!(page.text, "Um [[Oceano Pacífico|mar]].");
}

/// Test the edit summary and page rendering
#[test]
fn test_generateSummary_withConfiguredTemplate_shouldFillPlaceholders() {
    let orchestrator = common::orchestrator(Arc::new(InMemoryWiki::new()), Arc::new(MockTranslator::working()));

    assert_eq!(
        orchestrator.generate_summary("Atlantic Ocean", "en", "pt"),
        "Translated from the English article [[:en:Atlantic Ocean]]"
    );
    assert_eq!(
        orchestrator.render_page(&Page::new("Mar", "pt", "Um mar.")),
        "== Mar ==\nUm mar."
    );
}

/// Test that publishing saves the page and links it on Wikidata
#[tokio::test]
async fn test_publish_withTranslatedPage_shouldSaveAndLink() {
    let wiki = Arc::new(common::atlantic_wiki());
    let orchestrator = common::orchestrator(wiki.clone(), Arc::new(common::atlantic_translator()));

    let outcome = orchestrator.translate_page("Atlantic Ocean", "en", "pt", None).await.unwrap();
    let TranslationOutcome::Translated { source, page } = outcome else {
        panic!("expected a translated page");
    };
    let summary = orchestrator.generate_summary(&source.title, &source.language, &page.language);
    orchestrator.publish(&source, &page, &summary).await.unwrap();

    let saved = wiki.saved_pages();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0.title, "Oceano Atlântico");
    assert_eq!(saved[0].1, summary);

    let sitelinks = wiki.sitelinks();
    assert_eq!(sitelinks.len(), 1);
    assert_eq!(sitelinks[0].original_title, "Atlantic Ocean");
    assert_eq!(sitelinks[0].new_title, "Oceano Atlântico");
    assert_eq!(sitelinks[0].target_language, "pt");
}

/// Test that the shared article masks the way the canned translation expects
#[test]
fn test_atlanticArticle_masking_shouldMatchCannedTranslation() {
    let masked = wikitrans::mask(ATLANTIC_OCEAN_TEXT);

    assert_eq!(masked.hyperlinks.len(), 3);
    assert!(masked.text.ends_with("[[LINK2|Nowhere Land]].<REF1>"));
}
