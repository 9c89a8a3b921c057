//! Glossary store mapping source terms to target renderings

use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// A single glossary entry.
///
/// Entries whose rendering equals the term are proper nouns: they are
/// protected during translation and restored verbatim, never substituted.
/// Entries whose rendering differs are substituted after restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub term: String,
    pub rendering: String,
}

impl GlossaryEntry {
    /// Protected-only entries keep their source form in the output
    pub fn is_protected_only(&self) -> bool {
        self.term == self.rendering
    }

    /// Substitutable entries are replaced with their rendering post-restore
    pub fn is_substitutable(&self) -> bool {
        !self.is_protected_only()
    }
}

/// Read-only glossary, loaded once at startup.
///
/// Entries are kept sorted longest-term-first so a short term never matches
/// inside a longer one during protection or substitution.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
}

impl Glossary {
    /// Build a glossary from term/rendering pairs
    pub fn new(terms: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut entries: Vec<GlossaryEntry> = terms
            .into_iter()
            .map(|(term, rendering)| GlossaryEntry { term, rendering })
            .collect();

        entries.sort_by(|a, b| {
            b.term
                .len()
                .cmp(&a.term.len())
                .then_with(|| a.term.cmp(&b.term))
        });

        Self { entries }
    }

    /// Load a glossary from a JSON object file.
    ///
    /// A missing or unreadable file degrades to an empty glossary; the
    /// pipeline still runs, it simply protects and substitutes nothing.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not load glossary {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&content) {
            Ok(map) => {
                let glossary = Self::new(map);
                info!("Loaded {} glossary entries", glossary.len());
                glossary
            }
            Err(e) => {
                warn!("Invalid glossary {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// All entries, longest term first
    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    /// Entries requiring post-restore substitution, longest term first
    pub fn substitutable(&self) -> impl Iterator<Item = &GlossaryEntry> {
        self.entries.iter().filter(|e| e.is_substitutable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Glossary {
        Glossary::new([
            ("API".to_string(), "接口".to_string()),
            ("React".to_string(), "React".to_string()),
            ("React Native".to_string(), "React Native".to_string()),
        ])
    }

    #[test]
    fn test_longest_term_first() {
        let glossary = sample();
        let terms: Vec<&str> = glossary.entries().iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["React Native", "React", "API"]);
    }

    #[test]
    fn test_protected_only_detection() {
        let glossary = sample();
        let react = glossary
            .entries()
            .iter()
            .find(|e| e.term == "React")
            .unwrap();
        let api = glossary.entries().iter().find(|e| e.term == "API").unwrap();

        assert!(react.is_protected_only());
        assert!(api.is_substitutable());
    }

    #[test]
    fn test_substitutable_filter() {
        let glossary = sample();
        let subs: Vec<&str> = glossary.substitutable().map(|e| e.term.as_str()).collect();
        assert_eq!(subs, vec!["API"]);
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let glossary = Glossary::load("/nonexistent/glossary.json");
        assert!(glossary.is_empty());
    }
}
