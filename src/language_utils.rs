use anyhow::{Result, anyhow};
use isolang::Language;
use std::collections::HashMap;

/// Language utilities for wiki language codes
///
/// Wiki subdomains are mostly ISO 639-1 codes ("en", "pt"), sometimes ISO 639-3
/// codes ("ast") and sometimes variants or project names ("pt-br", "simple").
/// These helpers map them onto isolang where possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Base language of a wiki code: "pt-br" -> "pt"
pub fn base_code(code: &str) -> String {
    let normalized = code.trim().to_lowercase();
    match normalized.split_once(['-', '_']) {
        Some((base, _)) => base.to_string(),
        None => normalized,
    }
}

fn lookup(code: &str) -> Option<(Language, LanguageCodeType)> {
    let base = base_code(code);
    match base.len() {
        2 => Language::from_639_1(&base).map(|l| (l, LanguageCodeType::Part1)),
        3 => Language::from_639_3(&base).map(|l| (l, LanguageCodeType::Part3)),
        _ => None,
    }
}

/// Validate that a wiki code maps to an ISO 639 language
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    lookup(code)
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a wiki code to ISO 639-3 (3-letter) format
pub fn normalize_to_part3(code: &str) -> Result<String> {
    lookup(code)
        .map(|(lang, _)| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    lookup(code)
        .map(|(lang, _)| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))
}

/// Long name of a language: configured names win, then the ISO name, then the code itself
pub fn long_language_name(code: &str, language_dict: &HashMap<String, String>) -> String {
    language_dict
        .get(code)
        .cloned()
        .or_else(|| get_language_name(code).ok())
        .unwrap_or_else(|| code.to_string())
}
