//! Plain-text and markdown driver

use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::chunk::chunk;
use crate::core::client::Translator;
use crate::core::errors::{Result, TranslationError};
use crate::core::glossary::Glossary;
use crate::core::protect::Protector;
use crate::core::restore::{apply_glossary, find_residual_tokens, restore};

/// Driver for plain-text and markdown documents:
/// protect -> chunk -> translate -> restore -> apply glossary.
#[derive(Debug)]
pub struct TextProcessor {
    translator: Translator,
    protector: Protector,
    glossary: Glossary,
}

impl TextProcessor {
    pub fn new(translator: Translator, glossary: Glossary) -> Self {
        Self {
            translator,
            protector: Protector::new(),
            glossary,
        }
    }

    /// The gateway this driver translates through
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Translate one document.
    ///
    /// Chunks are translated sequentially with the configured pause between
    /// them; a chunk failure aborts the rest of this document and
    /// propagates, so partial output is never produced.
    pub async fn translate_content(&self, content: &str) -> Result<String> {
        let protected = self.protector.protect(content, &self.glossary);
        debug!("Protected {} spans", protected.placeholder_count());

        let chunks = chunk(&protected.text, self.translator.config().max_chunk_len);
        let total = chunks.len();

        let mut translated_text = String::new();
        for (i, piece) in chunks.iter().enumerate() {
            let trimmed = piece.trim();
            if trimmed.is_empty() {
                continue;
            }

            debug!("Translating chunk {}/{}", i + 1, total);
            let translated = self.translator.translate_chunk(trimmed).await?;
            translated_text.push_str(&translated);
            translated_text.push('\n');

            if i + 1 < total {
                self.translator.pause().await;
            }
        }

        // chunking appends a final newline the source may not have had
        if !content.ends_with('\n') && translated_text.ends_with('\n') {
            translated_text.pop();
        }

        let restored = restore(&translated_text, &protected.placeholders);

        let leftover = find_residual_tokens(&restored);
        if !leftover.is_empty() {
            warn!(
                "{} placeholder tokens not restored: {:?}",
                leftover.len(),
                leftover
            );
        }

        Ok(apply_glossary(&restored, &self.glossary))
    }

    /// Translate a single file from `input` to `output`
    pub async fn translate_file(&self, input: &Path, output: &Path) -> Result<()> {
        debug!("Translating: {}", input.display());

        let content = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| TranslationError::FileError {
                path: input.display().to_string(),
                message: e.to_string(),
            })?;

        let translated = self.translate_content(&content).await?;

        if let Some(parent) = output.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TranslationError::FileError {
                        path: parent.display().to_string(),
                        message: e.to_string(),
                    })?;
            }
        }

        tokio::fs::write(output, translated)
            .await
            .map_err(|e| TranslationError::FileError {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;

        info!("Translated: {} -> {}", input.display(), output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TranslatorConfig;
    use crate::core::mock::MockProvider;
    use std::sync::Arc;

    fn processor(provider: MockProvider, glossary: Glossary) -> TextProcessor {
        let config = TranslatorConfig {
            translation_delay_ms: 0,
            retry_delay_ms: 0,
            ..Default::default()
        };
        TextProcessor::new(Translator::new(config, Arc::new(provider)), glossary)
    }

    fn glossary() -> Glossary {
        Glossary::new([
            ("React".to_string(), "React".to_string()),
            ("API".to_string(), "接口".to_string()),
        ])
    }

    #[tokio::test]
    async fn test_identity_round_trip_with_url_and_term() {
        let processor = processor(MockProvider::identity(), glossary());
        let input = "Visit https://example.com for the React docs.";

        let output = processor.translate_content(input).await.unwrap();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_code_block_survives_byte_identical() {
        let processor = processor(MockProvider::identity(), glossary());
        let block = "```rust\nlet api = \"https://example.com/React\";\n```";
        let input = format!("Before.\n{}\nAfter.", block);

        let output = processor.translate_content(&input).await.unwrap();
        assert!(output.contains(block));
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_multi_chunk_round_trip() {
        let config = TranslatorConfig {
            translation_delay_ms: 0,
            max_chunk_len: 16,
            ..Default::default()
        };
        let translator = Translator::new(config, Arc::new(MockProvider::identity()));
        let processor = TextProcessor::new(translator, Glossary::default());

        let input = "first line here\nsecond line here\nthird line here";
        let output = processor.translate_content(input).await.unwrap();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn test_no_placeholder_leakage() {
        let processor = processor(MockProvider::identity(), glossary());
        let input =
            "Use the API with `curl` at https://api.example.com/v1 in ./scripts/run.sh for React.";

        let output = processor.translate_content(input).await.unwrap();
        assert!(find_residual_tokens(&output).is_empty());
    }

    #[tokio::test]
    async fn test_glossary_substitution_after_restore() {
        let processor = processor(MockProvider::identity(), glossary());

        let output = processor.translate_content("Use the API.").await.unwrap();
        assert_eq!(output, "Use the 接口.");
    }

    #[tokio::test]
    async fn test_mangled_glossary_token_recovered() {
        let processor = processor(MockProvider::mangling(), glossary());

        let output = processor
            .translate_content("The API returns data.")
            .await
            .unwrap();
        assert_eq!(output, "The 接口 returns data.");
        assert!(find_residual_tokens(&output).is_empty());
    }

    #[tokio::test]
    async fn test_chunk_failure_aborts_document() {
        let processor = processor(MockProvider::failing(), Glossary::default());

        let err = processor.translate_content("some text").await.unwrap_err();
        assert!(matches!(err, TranslationError::RetriesExhausted { .. }));
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let processor = processor(MockProvider::identity(), glossary());
        let dir = tempfile::tempdir().unwrap();

        let input = dir.path().join("doc.md");
        let output = dir.path().join("out/doc.md");
        tokio::fs::write(&input, "Read the React guide at https://example.com.\n")
            .await
            .unwrap();

        processor.translate_file(&input, &output).await.unwrap();

        let written = tokio::fs::read_to_string(&output).await.unwrap();
        assert_eq!(written, "Read the React guide at https://example.com.\n");
    }
}
