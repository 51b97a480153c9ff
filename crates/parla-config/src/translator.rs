use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_primary_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_secondary_url() -> String {
    "https://libretranslate.com/translate".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// MyMemory `get` endpoint
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    /// LibreTranslate `translate` endpoint
    #[serde(default = "default_secondary_url")]
    pub secondary_url: String,
    /// Only sent to LibreTranslate when non-empty
    #[serde(default)]
    pub secondary_api_key: String,
    /// Upper bound for a single provider attempt
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl TranslatorConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            secondary_url: default_secondary_url(),
            secondary_api_key: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
