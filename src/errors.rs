/*!
 * Error types for the wikitrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised by a wiki site client
#[derive(Error, Debug)]
pub enum WikiError {
    /// The page does not exist in the wiki of the given language
    #[error("Page doesn't exist in the {language} wiki: {title}")]
    PageNotFound {
        /// Title that was looked up
        title: String,
        /// Language of the wiki that was queried
        language: String,
    },

    /// The wiki for this language is not configured or cannot be reached
    #[error("Wiki not available for language: {0}")]
    WikiUnavailable(String),

    /// Transport-level failure talking to the wiki API
    #[error("Wiki request failed: {0}")]
    RequestFailed(String),

    /// The wiki API answered with something we could not decode
    #[error("Failed to parse wiki response: {0}")]
    ParseError(String),

    /// The wiki API answered with an explicit error object
    #[error("Wiki API error: {code} - {info}")]
    ApiError {
        /// MediaWiki error code
        code: String,
        /// Human readable error description
        info: String,
    },
}

impl WikiError {
    /// Whether the error means the page or wiki is missing, as opposed to a transport failure
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::PageNotFound { .. } | Self::WikiUnavailable(_))
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the wiki client
    #[error("Wiki error: {0}")]
    Wiki(#[from] WikiError),

    /// The language is not part of the configured supported languages
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The translation backend returned something unusable
    #[error("Translation backend failure: {0}")]
    Backend(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the wiki client
    #[error("Wiki error: {0}")]
    Wiki(#[from] WikiError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
