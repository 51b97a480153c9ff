use async_trait::async_trait;
use parla_core::TranslationRequest;
use serde::{Deserialize, Serialize};

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// LibreTranslate `translate` endpoint, used as the fallback provider
#[derive(Clone)]
pub struct LibreTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl LibreTranslator {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url,
            api_key: None,
        }
    }

    /// Empty keys are treated as "no key"
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.is_empty()).then_some(api_key);
        self
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        let body = LibreRequest {
            q: &request.text,
            // "auto" passes through literally
            source: &request.source,
            target: &request.target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(TranslateError::transport)?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            tracing::debug!(status, %detail, "LibreTranslate rejected request");
            return Err(TranslateError::HttpStatus(status));
        }

        let parsed: LibreResponse = response.json().await.map_err(|e| {
            TranslateError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        let text = parsed
            .translated_text
            .ok_or_else(|| {
                TranslateError::InvalidResponse("No translatedText in response".to_string())
            })?;

        Ok(Translation {
            text,
            provider: "libretranslate".to_string(),
            confidence: None,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "LibreTranslate".to_string(),
        }
    }
}
