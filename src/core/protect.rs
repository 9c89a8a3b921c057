//! Placeholder protection for translation-unsafe content

use regex::{Captures, Regex};

use crate::core::glossary::Glossary;
use crate::core::models::{Placeholder, ProtectedDocument};

/// Span kinds shielded from the translator, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    MarkupTag,
    CodeBlock,
    InlineCode,
    Url,
    FilePath,
    GlossaryTerm,
}

impl SpanKind {
    /// Allocate the placeholder token for this kind.
    ///
    /// Glossary tokens use the compact `__G<n>__` shape; a readable word
    /// inside the token tends to get translated along with the prose.
    fn token(self, n: usize) -> String {
        match self {
            SpanKind::MarkupTag => format!("__XML_TAG_{n}__"),
            SpanKind::CodeBlock => format!("__CODE_BLOCK_{n}__"),
            SpanKind::InlineCode => format!("__INLINE_CODE_{n}__"),
            SpanKind::Url => format!("__URL_{n}__"),
            SpanKind::FilePath => format!("__FILE_PATH_{n}__"),
            SpanKind::GlossaryTerm => format!("__G{n}__"),
        }
    }
}

/// Accumulator threaded through the extraction passes of one document.
///
/// The counter is monotonic across all passes, so tokens are pairwise
/// distinct within a document.
#[derive(Debug, Default)]
struct ProtectState {
    counter: usize,
    placeholders: Vec<Placeholder>,
}

impl ProtectState {
    fn allocate(&mut self, kind: SpanKind, original: &str) -> String {
        let token = kind.token(self.counter);
        self.counter += 1;
        self.placeholders.push(Placeholder::new(token.as_str(), original));
        token
    }
}

/// Extracts translation-unsafe spans into uniquely keyed placeholders.
///
/// Patterns are compiled once; all per-document state lives in a local
/// accumulator, so a single `Protector` can serve many documents in turn.
#[derive(Debug)]
pub struct Protector {
    markup_tag: Regex,
    code_block: Regex,
    inline_code: Regex,
    url: Regex,
    file_path: Regex,
    token_shape: Regex,
}

impl Default for Protector {
    fn default() -> Self {
        Self::new()
    }
}

impl Protector {
    pub fn new() -> Self {
        Self {
            // <tag>, </tag>, <tag attr="value">, <!-- comment -->
            markup_tag: Regex::new(r"<[^>]+>").expect("markup tag pattern"),
            // fenced blocks, non-greedy so adjacent blocks stay separate
            code_block: Regex::new(r"```[\s\S]*?```").expect("code block pattern"),
            inline_code: Regex::new(r"`[^`\n]+`").expect("inline code pattern"),
            url: Regex::new(r"https?://[^\s)]+").expect("url pattern"),
            file_path: Regex::new(r"(?m)(^|\s)([./][\w/.\-]+)").expect("file path pattern"),
            token_shape: Regex::new(r"^__[A-Za-z_]*\d+__$").expect("token shape pattern"),
        }
    }

    /// Replace every translation-unsafe span in `raw` with a placeholder
    /// token, in fixed pass order: markup tags, fenced code blocks, inline
    /// code, URLs, file paths, then glossary terms.
    ///
    /// Earlier passes claim overlapping content first; a URL inside a markup
    /// attribute is protected as part of the tag, and nothing inside a
    /// fenced block is visible to the later passes.
    pub fn protect(&self, raw: &str, glossary: &Glossary) -> ProtectedDocument {
        let mut state = ProtectState::default();

        let text = self.protect_pattern(raw, &self.markup_tag, SpanKind::MarkupTag, &mut state);
        let text = self.protect_pattern(&text, &self.code_block, SpanKind::CodeBlock, &mut state);
        let text = self.protect_pattern(&text, &self.inline_code, SpanKind::InlineCode, &mut state);
        let text = self.protect_pattern(&text, &self.url, SpanKind::Url, &mut state);
        let text = self.protect_file_paths(&text, &mut state);
        let text = self.protect_glossary_terms(&text, glossary, &mut state);

        ProtectedDocument {
            text,
            placeholders: state.placeholders,
        }
    }

    fn protect_pattern(
        &self,
        text: &str,
        pattern: &Regex,
        kind: SpanKind,
        state: &mut ProtectState,
    ) -> String {
        pattern
            .replace_all(text, |caps: &Captures| state.allocate(kind, &caps[0]))
            .into_owned()
    }

    /// Protect slash- or dot-prefixed tokens that look like file paths.
    ///
    /// Only candidates containing a `/` (or starting with `./` or `../`)
    /// are protected, so ordinary words with dots are left alone.
    fn protect_file_paths(&self, text: &str, state: &mut ProtectState) -> String {
        self.file_path
            .replace_all(text, |caps: &Captures| {
                let lead = &caps[1];
                let candidate = &caps[2];
                if candidate.contains('/')
                    || candidate.starts_with("./")
                    || candidate.starts_with("../")
                {
                    format!("{}{}", lead, state.allocate(SpanKind::FilePath, candidate))
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    /// Protect glossary terms, longest term first, whole-word and
    /// case-insensitive. Text already shaped like a placeholder token is
    /// never re-protected.
    fn protect_glossary_terms(
        &self,
        text: &str,
        glossary: &Glossary,
        state: &mut ProtectState,
    ) -> String {
        let mut result = text.to_string();

        for entry in glossary.entries() {
            let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&entry.term)))
                .expect("escaped term pattern");

            result = pattern
                .replace_all(&result, |caps: &Captures| {
                    let matched = &caps[0];
                    if self.token_shape.is_match(matched) {
                        matched.to_string()
                    } else {
                        state.allocate(SpanKind::GlossaryTerm, matched)
                    }
                })
                .into_owned();
        }

        result
    }
}
