use std::sync::Arc;

use async_trait::async_trait;
use parla_core::TranslationRequest;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// Ordered list of providers, each tried exactly once until one succeeds.
///
/// Failures of earlier tiers are logged and swallowed; only when every tier
/// fails does the caller see [`TranslateError::AllProvidersFailed`].
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn Translator>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn Translator>>) -> Self {
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.metadata().name).collect()
    }
}

#[async_trait]
impl Translator for ProviderChain {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        for (tier, provider) in self.providers.iter().enumerate() {
            let name = provider.metadata().name;

            match provider.translate(request).await {
                Ok(translation) => {
                    tracing::debug!(
                        seq = request.seq,
                        tier,
                        provider = %name,
                        "translation succeeded"
                    );
                    return Ok(translation);
                }
                Err(e) => {
                    tracing::warn!(
                        seq = request.seq,
                        tier,
                        provider = %name,
                        error = %e,
                        "provider failed"
                    );
                }
            }
        }

        Err(TranslateError::AllProvidersFailed)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.provider_names().join(" -> "),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{LibreTranslator, MyMemoryTranslator, http_client};

    fn request(text: &str, source: &str, target: &str) -> TranslationRequest {
        TranslationRequest::new(1, text, source, target).unwrap()
    }

    fn chain_for(server: &MockServer, client: reqwest::Client) -> ProviderChain {
        ProviderChain::new(vec![
            Arc::new(MyMemoryTranslator::new(
                client.clone(),
                format!("{}/get", server.uri()),
            )),
            Arc::new(LibreTranslator::new(
                client,
                format!("{}/translate", server.uri()),
            )),
        ])
    }

    async fn mount_secondary(server: &MockServer, template: ResponseTemplate, expected: u64) {
        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(template)
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseStatus": 200,
                "responseData": { "translatedText": "Hello" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_secondary(&server, ResponseTemplate::new(200), 0).await;

        let translation = chain_for(&server, reqwest::Client::new())
            .translate(&request("Hola", "es", "en"))
            .await
            .unwrap();

        assert_eq!(translation.text, "Hello");
        assert_eq!(translation.provider, "mymemory");
    }

    #[tokio::test]
    async fn test_primary_http_error_falls_back_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        mount_secondary(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "translatedText": "Hello" })),
            1,
        )
        .await;

        let translation = chain_for(&server, reqwest::Client::new())
            .translate(&request("Hola", "es", "en"))
            .await
            .unwrap();

        assert_eq!(translation.text, "Hello");
        assert_eq!(translation.provider, "libretranslate");
    }

    #[tokio::test]
    async fn test_primary_application_error_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseStatus": 403,
                "responseDetails": "QUOTA EXCEEDED"
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_secondary(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "translatedText": "Hello" })),
            1,
        )
        .await;

        let translation = chain_for(&server, reqwest::Client::new())
            .translate(&request("Hola", "es", "en"))
            .await
            .unwrap();

        assert_eq!(translation.provider, "libretranslate");
    }

    #[tokio::test]
    async fn test_both_fail() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;
        mount_secondary(&server, ResponseTemplate::new(500), 1).await;

        let err = chain_for(&server, reqwest::Client::new())
            .translate(&request("Hola", "es", "en"))
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::AllProvidersFailed));
        assert_eq!(err.to_string(), "All translation providers failed");
    }

    #[tokio::test]
    async fn test_slow_primary_times_out_and_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(5))
                    .set_body_json(json!({
                        "responseStatus": 200,
                        "responseData": { "translatedText": "too late" }
                    })),
            )
            .mount(&server)
            .await;
        mount_secondary(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "translatedText": "Hello" })),
            1,
        )
        .await;

        let client = http_client(Duration::from_millis(200)).unwrap();
        let translation = chain_for(&server, client)
            .translate(&request("Hola", "es", "en"))
            .await
            .unwrap();

        assert_eq!(translation.text, "Hello");
    }

    #[tokio::test]
    async fn test_empty_chain_fails() {
        let err = ProviderChain::new(vec![])
            .translate(&request("Hola", "es", "en"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::AllProvidersFailed));
    }

    #[test]
    fn test_metadata_lists_tiers_in_order() {
        let client = reqwest::Client::new();
        let chain = ProviderChain::new(vec![
            Arc::new(MyMemoryTranslator::new(client.clone(), "http://a".into())),
            Arc::new(LibreTranslator::new(client, "http://b".into())),
        ]);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.metadata().name, "MyMemory -> LibreTranslate");
    }
}
