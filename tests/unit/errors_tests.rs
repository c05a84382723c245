/*!
 * Tests for error types
 */

use wikitrans::errors::{AppError, ProviderError, TranslationError, WikiError};

/// Test that error messages carry their details
#[test]
fn test_errorMessages_shouldIncludeDetails() {
    let missing = WikiError::PageNotFound {
        title: "Atlantic Ocean".to_string(),
        language: "en".to_string(),
    };
    assert_eq!(missing.to_string(), "Page doesn't exist in the en wiki: Atlantic Ocean");

    let api = ProviderError::ApiError { status_code: 503, message: "overloaded".to_string() };
    assert_eq!(api.to_string(), "API responded with error: 503 - overloaded");

    let unsupported = TranslationError::UnsupportedLanguage("fr".to_string());
    assert_eq!(unsupported.to_string(), "Unsupported language: fr");
}

/// Test that missing pages are told apart from transport failures
#[test]
fn test_wikiError_isMissing_shouldOnlyMatchMissingPagesAndWikis() {
    assert!(WikiError::PageNotFound { title: "X".to_string(), language: "pt".to_string() }.is_missing());
    assert!(WikiError::WikiUnavailable("xx".to_string()).is_missing());
    assert!(!WikiError::RequestFailed("timeout".to_string()).is_missing());
    assert!(!WikiError::ApiError { code: "badtoken".to_string(), info: "Invalid token".to_string() }.is_missing());
}

/// Test conversions into the translation and application errors
#[test]
fn test_errorConversions_shouldWrapSourceErrors() {
    let error: TranslationError = ProviderError::RateLimitExceeded("slow down".to_string()).into();
    assert!(matches!(error, TranslationError::Provider(ProviderError::RateLimitExceeded(_))));

    let error: TranslationError = WikiError::WikiUnavailable("xx".to_string()).into();
    assert!(matches!(error, TranslationError::Wiki(WikiError::WikiUnavailable(_))));

    let error: AppError = TranslationError::Backend("empty".to_string()).into();
    assert_eq!(error.to_string(), "Translation error: Translation backend failure: empty");

    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "jobs.tsv").into();
    assert!(matches!(error, AppError::File(_)));
}
