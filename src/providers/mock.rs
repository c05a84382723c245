/*!
 * Mock translator for testing.
 *
 * This module provides a translator that simulates different backend behaviors:
 * - `MockTranslator::working()` - Echoes the text, or returns a canned translation
 * - `MockTranslator::intermittent(n)` - Fails every Nth request
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::empty()` - Returns empty text
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{ProviderError, TranslationError};
use crate::translation::{ContentKind, TextTranslator};

/// One translation request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
    /// Content kind of the request
    pub kind: ContentKind,
}

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns empty response
    Empty,
}

/// Mock translator recording every request it receives
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Canned translations keyed by source text
    translations: HashMap<String, String>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&MockRequest) -> String>,
    /// Requests received so far
    requests: Arc<Mutex<Vec<MockRequest>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            translations: HashMap::new(),
            custom_response: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock that echoes its input
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Return `translated` whenever exactly `text` is requested
    pub fn with_translation(mut self, text: impl Into<String>, translated: impl Into<String>) -> Self {
        self.translations.insert(text.into(), translated.into());
        self
    }

    /// Set a custom response generator, used when no canned translation matches
    pub fn with_custom_response(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn respond(&self, request: &MockRequest) -> String {
        if let Some(translated) = self.translations.get(&request.text) {
            return translated.clone();
        }
        match self.custom_response {
            Some(generator) => generator(request),
            None => request.text.clone(),
        }
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            translations: self.translations.clone(),
            custom_response: self.custom_response,
            requests: Arc::clone(&self.requests),
        }
    }
}

#[async_trait]
impl TextTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        kind: &ContentKind,
    ) -> Result<String, TranslationError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        let request = MockRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            kind: kind.clone(),
        };
        self.requests.lock().push(request.clone());

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(&request)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    }.into())
                } else {
                    Ok(self.respond(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }.into()),

            MockBehavior::Empty => Ok(String::new()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
