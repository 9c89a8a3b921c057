//! JSON driver translating `description` fields

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::core::errors::{Result, TranslationError};
use crate::processors::text::TextProcessor;

/// Driver for JSON documents.
///
/// Walks the parsed value and runs only string values held by keys
/// literally named `description` through the translation pipeline; all
/// other keys and the document structure are left untouched. A field that
/// fails to translate keeps its original value so sibling fields still get
/// processed.
#[derive(Debug)]
pub struct JsonProcessor {
    pipeline: TextProcessor,
}

impl JsonProcessor {
    pub fn new(pipeline: TextProcessor) -> Self {
        Self { pipeline }
    }

    /// Translate every description field of a parsed document in place.
    ///
    /// Returns how many fields were translated; failed fields are logged
    /// and keep their original value.
    pub async fn translate_value(&self, root: &mut Value) -> usize {
        let mut fields: Vec<&mut String> = Vec::new();
        collect_description_fields(root, &mut fields);

        let total = fields.len();
        debug!("Found {} description fields", total);

        let mut translated = 0;
        for (i, field) in fields.into_iter().enumerate() {
            match self.pipeline.translate_content(field).await {
                Ok(result) => {
                    *field = result;
                    translated += 1;
                }
                Err(e) => {
                    warn!("Keeping original description after failed translation: {}", e);
                }
            }

            if i + 1 < total {
                self.pipeline.translator().pause().await;
            }
        }

        translated
    }

    /// Translate a JSON file from `input` to `output`.
    ///
    /// The reconstructed document must re-parse as valid JSON before it is
    /// written; otherwise nothing is written and the error propagates.
    pub async fn translate_file(&self, input: &Path, output: &Path) -> Result<()> {
        debug!("Translating JSON: {}", input.display());

        let content = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| TranslationError::FileError {
                path: input.display().to_string(),
                message: e.to_string(),
            })?;

        let mut value: Value = serde_json::from_str(&content)?;
        let translated = self.translate_value(&mut value).await;

        let serialized = serde_json::to_string_pretty(&value)?;
        if let Err(e) = serde_json::from_str::<Value>(&serialized) {
            return Err(TranslationError::JsonValidationError {
                path: input.display().to_string(),
                message: e.to_string(),
            });
        }

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

        tokio::fs::write(output, serialized)
            .await
            .map_err(|e| TranslationError::FileError {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;

        info!(
            "Translated {} description fields: {} -> {}",
            translated,
            input.display(),
            output.display()
        );
        Ok(())
    }
}

/// Recursive descent over the closed set of JSON value kinds, collecting
/// mutable references to every string held by a `description` key.
fn collect_description_fields<'a>(value: &'a mut Value, out: &mut Vec<&'a mut String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "description" {
                    if let Value::String(text) = child {
                        out.push(text);
                        continue;
                    }
                }
                collect_description_fields(child, out);
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                collect_description_fields(child, out);
            }
        }
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::Translator;
    use crate::core::config::TranslatorConfig;
    use crate::core::glossary::Glossary;
    use crate::core::mock::MockProvider;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn processor(provider: MockProvider) -> JsonProcessor {
        let config = TranslatorConfig {
            translation_delay_ms: 0,
            retry_delay_ms: 0,
            ..Default::default()
        };
        let glossary = Glossary::new([("API".to_string(), "接口".to_string())]);
        let translator = Translator::new(config, Arc::new(provider));
        JsonProcessor::new(TextProcessor::new(translator, glossary))
    }

    #[tokio::test]
    async fn test_description_field_translated() {
        let processor = processor(MockProvider::identity());
        let mut value = json!({"description": "Use the API."});

        let translated = processor.translate_value(&mut value).await;

        assert_eq!(translated, 1);
        assert_json_eq!(value, json!({"description": "Use the 接口."}));
    }

    #[tokio::test]
    async fn test_structure_and_other_keys_untouched() {
        let processor = processor(MockProvider::identity());
        let mut value = json!({
            "name": "API",
            "version": 2,
            "items": [
                {"description": "First API item.", "id": 1},
                {"description": "Second item.", "id": 2}
            ],
            "nested": {"description": "Deep API usage.", "enabled": true}
        });

        processor.translate_value(&mut value).await;

        assert_json_eq!(
            value,
            json!({
                "name": "API",
                "version": 2,
                "items": [
                    {"description": "First 接口 item.", "id": 1},
                    {"description": "Second item.", "id": 2}
                ],
                "nested": {"description": "Deep 接口 usage.", "enabled": true}
            })
        );
    }

    #[tokio::test]
    async fn test_non_string_description_recursed() {
        let processor = processor(MockProvider::identity());
        let mut value = json!({"description": {"description": "Inner API text."}});

        let translated = processor.translate_value(&mut value).await;

        assert_eq!(translated, 1);
        assert_json_eq!(
            value,
            json!({"description": {"description": "Inner 接口 text."}})
        );
    }

    #[tokio::test]
    async fn test_field_failure_keeps_original() {
        let processor = processor(MockProvider::failing());
        let mut value = json!({"description": "Stays as is."});

        let translated = processor.translate_value(&mut value).await;

        assert_eq!(translated, 0);
        assert_json_eq!(value, json!({"description": "Stays as is."}));
    }

    #[tokio::test]
    async fn test_json_file_round_trip_is_valid_json() {
        let processor = processor(MockProvider::identity());
        let dir = tempfile::tempdir().unwrap();

        let input = dir.path().join("schema.json");
        let output = dir.path().join("schema.zh.json");
        tokio::fs::write(
            &input,
            r#"{"description": "Use the API.", "fields": [{"description": "An API key."}]}"#,
        )
        .await
        .unwrap();

        processor.translate_file(&input, &output).await.unwrap();

        let written = tokio::fs::read_to_string(&output).await.unwrap();
        let reparsed: Value = serde_json::from_str(&written).unwrap();
        assert_json_eq!(
            reparsed,
            json!({
                "description": "Use the 接口.",
                "fields": [{"description": "An 接口 key."}]
            })
        );
    }
}
