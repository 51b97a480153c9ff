use std::env;
use std::str::FromStr;

use parla_core::language;
use serde::{Deserialize, Serialize};

use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod translator;
pub mod ui;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unsupported source language: {0}")]
    InvalidSourceLanguage(String),

    #[error("Unsupported target language: {0}")]
    InvalidTargetLanguage(String),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub ui: UiConfig,

    /// Capacity of the frontend <-> app channels
    pub channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str, default: u64| -> u64 {
            lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
        };

        let translator_defaults = TranslatorConfig::default();
        let translator = TranslatorConfig {
            primary_url: lookup("PARLA_PRIMARY_URL").unwrap_or(translator_defaults.primary_url),
            secondary_url: lookup("PARLA_SECONDARY_URL")
                .unwrap_or(translator_defaults.secondary_url),
            secondary_api_key: lookup("PARLA_SECONDARY_API_KEY").unwrap_or_default(),
            request_timeout_ms: parsed(
                "PARLA_REQUEST_TIMEOUT_MS",
                translator_defaults.request_timeout_ms,
            ),
        };

        let ui_defaults = UiConfig::default();
        let ui = UiConfig {
            debounce_ms: parsed("PARLA_DEBOUNCE_MS", ui_defaults.debounce_ms),
            status_display_ms: parsed("PARLA_STATUS_DISPLAY_MS", ui_defaults.status_display_ms),
            source_lang: lookup("PARLA_SOURCE_LANG").unwrap_or(ui_defaults.source_lang),
            target_lang: lookup("PARLA_TARGET_LANG").unwrap_or(ui_defaults.target_lang),
        };

        let channel_capacity = lookup("PARLA_CHANNEL_CAPACITY")
            .and_then(|v| usize::from_str(&v).ok())
            .unwrap_or(64);

        Config {
            translator,
            ui,
            channel_capacity,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !language::is_valid_source(&self.ui.source_lang) {
            return Err(ConfigError::InvalidSourceLanguage(
                self.ui.source_lang.clone(),
            ));
        }
        if !language::is_valid_target(&self.ui.target_lang) {
            return Err(ConfigError::InvalidTargetLanguage(
                self.ui.target_lang.clone(),
            ));
        }
        if self.translator.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("request_timeout_ms"));
        }
        if self.ui.debounce_ms == 0 {
            return Err(ConfigError::ZeroDuration("debounce_ms"));
        }
        if self.ui.status_display_ms == 0 {
            return Err(ConfigError::ZeroDuration("status_display_ms"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
