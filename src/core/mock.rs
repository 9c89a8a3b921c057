//! Mock providers for exercising the gateway and drivers in tests

use async_trait::async_trait;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::core::client::TranslateProvider;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{TranslationRequest, TranslationResult};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Returns the input text unchanged
    Identity,
    /// Fails every request
    Failing,
    /// Fails the first `n` requests, then returns input unchanged
    FailFirst(usize),
    /// Identity, except glossary placeholder tokens are rewritten the way a
    /// translator mangles them: `__G7__` becomes `__Glosario_7__`
    MangleGlossaryTokens,
}

/// Mock provider with a request counter
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// No-op translator: output equals input
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Provider that errors `n` times before succeeding
    pub fn fail_first(n: usize) -> Self {
        Self::new(MockBehavior::FailFirst(n))
    }

    /// Provider that corrupts glossary placeholder tokens
    pub fn mangling() -> Self {
        Self::new(MockBehavior::MangleGlossaryTokens)
    }

    /// Shared request counter, observable after the provider moves into the gateway
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.request_count)
    }
}

#[async_trait]
impl TranslateProvider for MockProvider {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let seen = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Identity => Ok(TranslationResult::new(request.text.clone())),
            MockBehavior::Failing => Err(TranslationError::NetworkError {
                message: "mock provider down".to_string(),
            }),
            MockBehavior::FailFirst(n) => {
                if seen < n {
                    Err(TranslationError::NetworkError {
                        message: format!("mock failure {} of {}", seen + 1, n),
                    })
                } else {
                    Ok(TranslationResult::new(request.text.clone()))
                }
            }
            MockBehavior::MangleGlossaryTokens => {
                let token = Regex::new(r"__G(\d+)__").expect("glossary token pattern");
                let mangled = token
                    .replace_all(&request.text, "__Glosario_${1}__")
                    .into_owned();
                Ok(TranslationResult::new(mangled))
            }
        }
    }
}
