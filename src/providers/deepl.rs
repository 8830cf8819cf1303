use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::{Client, StatusCode};
use url::Url;
use log::{debug, error};

use crate::errors::ProviderError;
use crate::providers::{TranslationRequest, Translator};

const FREE_API_ENDPOINT: &str = "https://api-free.deepl.com";
const PRO_API_ENDPOINT: &str = "https://api.deepl.com";

// DeepL reports an exhausted character quota with this non-standard status
const QUOTA_EXCEEDED_STATUS: u16 = 456;

/// DeepL client for interacting with the DeepL translation API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL of the API (without the /v2 path)
    endpoint: Url,
}

/// DeepL translate request body
#[derive(Debug, Serialize)]
pub struct DeepLRequest {
    /// Texts to translate
    pub text: Vec<String>,

    /// Source language (uppercase)
    pub source_lang: String,

    /// Target language (uppercase)
    pub target_lang: String,

    /// Markup handling mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_handling: Option<String>,

    /// Keep formatting of the source text
    pub preserve_formatting: bool,
}

impl From<TranslationRequest> for DeepLRequest {
    fn from(request: TranslationRequest) -> Self {
        Self {
            text: vec![request.text],
            source_lang: request.source_language,
            target_lang: request.target_language,
            tag_handling: request.tag_handling,
            preserve_formatting: request.preserve_formatting,
        }
    }
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One entry per input text
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Language DeepL detected in the source
    #[serde(default)]
    pub detected_source_language: Option<String>,

    /// The translated text
    pub text: String,
}

impl DeepL {
    /// Create a new DeepL client
    ///
    /// When `endpoint` is `None` the free or pro API is picked from the key:
    /// free-tier keys end in `:fx`.
    pub fn new(api_key: impl Into<String>, endpoint: Option<&str>, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key: String = api_key.into();
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ProviderError::AuthenticationError("DeepL API key is empty".to_string()));
        }

        let endpoint = match endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.trim().to_string(),
            _ => Self::default_endpoint(&api_key).to_string(),
        };
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| ProviderError::ConnectionError(format!("Invalid DeepL endpoint '{}': {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }

    // @returns: Public API base URL matching the key type
    pub fn default_endpoint(api_key: &str) -> &'static str {
        if api_key.ends_with(":fx") {
            FREE_API_ENDPOINT
        } else {
            PRO_API_ENDPOINT
        }
    }

    // @returns: Base URL requests are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // @returns: Full URL of the translate call
    pub fn translate_url(&self) -> String {
        format!("{}/v2/translate", self.endpoint.as_str().trim_end_matches('/'))
    }

    /// Send a translate request
    pub async fn complete(&self, request: DeepLRequest) -> Result<DeepLResponse, ProviderError> {
        let api_url = self.translate_url();
        debug!("Sending {} text(s) to {}", request.text.len(), api_url);

        let response = self.client.post(&api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(Self::status_error(status, error_text));
        }

        response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Map a non-success HTTP status to a provider error
    pub fn status_error(status: StatusCode, message: String) -> ProviderError {
        match status.as_u16() {
            401 | 403 => ProviderError::AuthenticationError(message),
            429 => ProviderError::RateLimitExceeded(message),
            QUOTA_EXCEEDED_STATUS => ProviderError::QuotaExceeded(message),
            status_code => ProviderError::ApiError { status_code, message },
        }
    }

    /// Extract text from a DeepL response
    pub fn extract_text_from_response(response: &DeepLResponse) -> Result<String, ProviderError> {
        response.translations.first()
            .map(|translation| translation.text.clone())
            .ok_or_else(|| ProviderError::ParseError("Response contained no translations".to_string()))
    }
}

#[async_trait]
impl Translator for DeepL {
    async fn translate(&self, request: TranslationRequest) -> Result<String, ProviderError> {
        let response = self.complete(request.into()).await?;
        Self::extract_text_from_response(&response)
    }

    fn name(&self) -> &str {
        "DeepL"
    }
}
