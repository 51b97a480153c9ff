use std::time::Duration;

use parla_core::language::{DEFAULT_SOURCE, DEFAULT_TARGET};
use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    500
}

fn default_status_display_ms() -> u64 {
    3000
}

fn default_source_lang() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_target_lang() -> String {
    DEFAULT_TARGET.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Quiet period after the last keystroke before translating
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long success/error messages stay visible
    #[serde(default = "default_status_display_ms")]
    pub status_display_ms: u64,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl UiConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn status_display(&self) -> Duration {
        Duration::from_millis(self.status_display_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            status_display_ms: default_status_display_ms(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
        }
    }
}
