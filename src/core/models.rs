//! Core data models for translation

use serde::{Deserialize, Serialize};

/// A protected span extracted from a document.
///
/// The token is what the provider sees; the original content is re-inserted
/// verbatim after translation. Tokens are unique within one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub token: String,
    pub original: String,
}

impl Placeholder {
    pub fn new(token: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            original: original.into(),
        }
    }
}

/// A document with all translation-unsafe spans replaced by placeholder
/// tokens, plus the ordered list of placeholders needed to undo it.
#[derive(Debug, Clone, Default)]
pub struct ProtectedDocument {
    pub text: String,
    pub placeholders: Vec<Placeholder>,
}

impl ProtectedDocument {
    /// Number of protected spans
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: Option<String>,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: None,
            target_lang: target_lang.into(),
        }
    }

    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self
    }
}

/// Translation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    pub detected_source_lang: Option<String>,
}

impl TranslationResult {
    pub fn new(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            detected_source_lang: None,
        }
    }
}
