/*!
 * Mock translator implementation for testing.
 *
 * This module provides a translator that simulates different behaviors:
 * - `MockTranslator::working()` - Always succeeds with tagged text
 * - `MockTranslator::with_responses(..)` - Returns scripted translations per target language
 * - `MockTranslator::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::{TranslationRequest, Translator};

/// Behavior mode for the mock translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Prefixes the text with the target language
    Working,
    /// Returns the scripted text for the target language, or fails if none
    Scripted(HashMap<String, String>),
    /// Always fails with an API error
    Failing,
    /// Fails with a quota error for the listed target languages only
    FailingFor(Vec<String>),
}

/// Mock translator that records every request it receives
#[derive(Debug, Clone)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Requests received so far, shared between clones
    requests: Arc<Mutex<Vec<TranslationRequest>>>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock returning a fixed translation per target language code
    pub fn with_responses<I, K, V>(responses: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let responses = responses
            .into_iter()
            .map(|(language, text)| (language.into(), text.into()))
            .collect();
        Self::new(MockBehavior::Scripted(responses))
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails only for the given target language codes
    pub fn failing_for(languages: &[&str]) -> Self {
        Self::new(MockBehavior::FailingFor(
            languages.iter().map(|language| language.to_string()).collect(),
        ))
    }

    /// Number of translate calls received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every request received, in order
    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, request: TranslationRequest) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match &self.behavior {
            MockBehavior::Working => {
                Ok(format!("[{}] {}", request.target_language, request.text))
            }
            MockBehavior::Scripted(responses) => {
                responses.get(&request.target_language).cloned().ok_or_else(|| {
                    ProviderError::ApiError {
                        status_code: 400,
                        message: format!("No scripted response for {}", request.target_language),
                    }
                })
            }
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated API failure".to_string(),
            }),
            MockBehavior::FailingFor(languages) => {
                if languages.contains(&request.target_language) {
                    Err(ProviderError::QuotaExceeded("Simulated quota exhaustion".to_string()))
                } else {
                    Ok(format!("[{}] {}", request.target_language, request.text))
                }
            }
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
