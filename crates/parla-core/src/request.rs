use crate::language;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Nothing to translate")]
    EmptyText,

    #[error("Auto-detect cannot be a target language")]
    AutoTarget,
}

/// A validated unit of work for the provider chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Monotonic per-session id; results for older ids are discarded
    pub seq: u64,
    pub text: String,
    pub source: String,
    pub target: String,
}

impl TranslationRequest {
    pub fn new(
        seq: u64,
        text: &str,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RequestError::EmptyText);
        }

        let target = target.into();
        if language::is_auto(&target) {
            return Err(RequestError::AutoTarget);
        }

        Ok(Self {
            seq,
            text: text.to_string(),
            source: source.into(),
            target,
        })
    }

    pub fn source_is_auto(&self) -> bool {
        language::is_auto(&self.source)
    }
}
