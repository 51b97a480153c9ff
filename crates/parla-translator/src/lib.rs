use std::time::Duration;

use parla_core::TranslationRequest;

pub mod chain;
pub mod libre;
pub mod mymemory;

pub use chain::ProviderChain;
pub use libre::LibreTranslator;
pub use mymemory::MyMemoryTranslator;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate the request text, exactly one attempt
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub provider: String,
    pub confidence: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("All translation providers failed")]
    AllProvidersFailed,
}

impl TranslateError {
    /// Classify a transport failure, keeping timeouts distinct
    pub fn transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::NetworkError(error)
        }
    }
}

/// Shared HTTP client; `timeout` bounds every single provider attempt
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, TranslateError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("parla/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(TranslateError::NetworkError)
}
