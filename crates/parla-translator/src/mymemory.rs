use async_trait::async_trait;
use parla_core::TranslationRequest;
use parla_core::language;
use reqwest::header::ACCEPT;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// MyMemory `get` endpoint, used as the primary provider
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl MyMemoryTranslator {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

/// `<src>|<tgt>`, or `autodetect|<tgt>` when the source is auto-detect
pub fn lang_pair(source: &str, target: &str) -> String {
    if language::is_auto(source) {
        format!("autodetect|{target}")
    } else {
        format!("{source}|{target}")
    }
}

fn status_is_ok(status: &serde_json::Value) -> bool {
    // responseStatus is a number on success but sometimes a string on errors
    status.as_u64() == Some(200) || status.as_str() == Some("200")
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        let langpair = lang_pair(&request.source, &request.target);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", request.text.as_str()), ("langpair", langpair.as_str())])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(TranslateError::transport)?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::HttpStatus(response.status().as_u16()));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        if !status_is_ok(&json["responseStatus"]) {
            let details = json["responseDetails"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            return Err(TranslateError::ApiError(format!(
                "responseStatus {}: {}",
                json["responseStatus"], details
            )));
        }

        let data = &json["responseData"];
        let translated_text = data["translatedText"]
            .as_str()
            .ok_or_else(|| {
                TranslateError::InvalidResponse("No translatedText in response".to_string())
            })?;

        Ok(Translation {
            text: translated_text.to_string(),
            provider: "mymemory".to_string(),
            confidence: data["match"].as_f64().map(|m| m as f32),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MyMemory".to_string(),
        }
    }
}
