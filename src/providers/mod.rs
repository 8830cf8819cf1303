/*!
 * Provider implementations for machine translation services.
 *
 * This module contains the client implementations the page translator can use:
 * - DeepL: DeepL REST API integration
 * - Mock: Scripted translator for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single text translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Text to translate, possibly containing markup
    pub text: String,

    /// Source language code as the provider expects it (e.g. "EN")
    pub source_language: String,

    /// Target language code as the provider expects it (e.g. "FR")
    pub target_language: String,

    /// Keep whitespace, punctuation and casing of the source
    pub preserve_formatting: bool,

    /// Markup the provider should parse and keep intact (e.g. "html")
    pub tag_handling: Option<String>,
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the page controller.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate the request text
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, request: TranslationRequest) -> Result<String, ProviderError>;

    /// Human readable provider name for log output
    fn name(&self) -> &str;
}

pub mod deepl;
pub mod mock;
