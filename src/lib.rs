//! doctran - Batch documentation translator
//!
//! Translates plain-text/Markdown documents and JSON `description` fields
//! via an external machine-translation provider, shielding markup, code,
//! URLs, file paths, and glossary terms behind reversible placeholders.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod core;
pub mod processors;

// Re-export key types for convenience
pub use crate::core::{
    client::{HttpProvider, TranslateProvider, Translator},
    config::TranslatorConfig,
    errors::TranslationError,
    glossary::{Glossary, GlossaryEntry},
    models::{Placeholder, ProtectedDocument, TranslationRequest, TranslationResult},
    protect::Protector,
};

pub use crate::processors::{batch::BatchScanner, json::JsonProcessor, text::TextProcessor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
