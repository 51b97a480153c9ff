//! Orchestrator state machine.
//!
//! All UI-visible state lives in [`TranslationState`]. Every user action, timer
//! and provider completion is fed in as an [`Action`]; the state mutates itself
//! and hands back the side effects the runtime has to perform. Nothing in here
//! touches the network, the clock or the clipboard.

use parla_types::{StatusKind, ViewState};

use crate::language::{self, DEFAULT_SOURCE, DEFAULT_TARGET};
use crate::request::TranslationRequest;

pub const MSG_TRANSLATING: &str = "Translating...";
pub const MSG_COMPLETED: &str = "Translation completed";
pub const MSG_FAILED: &str = "Translation failed. Please try again.";
pub const MSG_SAME_LANGUAGE: &str = "Source and target languages are the same";
pub const MSG_SWAP_AUTO: &str = "Cannot swap with auto-detect";
pub const MSG_NOTHING_TO_COPY: &str = "No translation to copy";
pub const MSG_COPIED: &str = "Translation copied to clipboard";
pub const MSG_COPY_FAILED: &str = "Failed to copy translation";

#[derive(Debug, Clone)]
pub enum Action {
    /// Input text edited; translation waits for the debounce timer
    InputChanged(String),
    DebounceFired { generation: u64 },
    /// Explicit trigger, ignored while a translation is in flight
    TranslateRequested,
    SourceLanguageChanged(String),
    TargetLanguageChanged(String),
    SwapLanguages,
    Clear,
    CopyResult,
    TranslationFinished {
        seq: u64,
        result: Result<String, String>,
    },
    CopyFinished(CopyOutcome),
    StatusExpired { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Translate(TranslationRequest),
    ScheduleDebounce { generation: u64 },
    ScheduleStatusClear { id: u64 },
    CopyToClipboard(String),
    FocusInput,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
    /// Bumped on every change so stale expiry timers can be told apart
    pub id: u64,
}

#[derive(Debug, Clone)]
pub struct TranslationState {
    source_lang: String,
    target_lang: String,
    input_text: String,
    output_text: String,
    status: Status,
    in_flight: bool,
    latest_seq: u64,
    debounce_generation: u64,
}

impl Default for TranslationState {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_TARGET)
    }
}

impl TranslationState {
    pub fn new(source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            input_text: String::new(),
            output_text: String::new(),
            status: Status::default(),
            in_flight: false,
            latest_seq: 0,
            debounce_generation: 0,
        }
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            input_text: self.input_text.clone(),
            output_text: self.output_text.clone(),
            status_message: self.status.message.clone(),
            status_kind: self.status.kind,
            translate_enabled: !self.in_flight,
        }
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        let mut effects = Vec::new();

        match action {
            Action::InputChanged(text) => {
                self.input_text = text;
                self.debounce_generation += 1;
                effects.push(Effect::ScheduleDebounce {
                    generation: self.debounce_generation,
                });
            }
            Action::DebounceFired { generation } => {
                if generation != self.debounce_generation {
                    tracing::trace!(generation, "superseded debounce timer");
                } else if !self.input_text.trim().is_empty() {
                    self.request_translation(&mut effects);
                }
            }
            Action::TranslateRequested => {
                if self.in_flight {
                    tracing::debug!("translate trigger ignored while a request is in flight");
                } else {
                    // a pending debounce would only repeat this request
                    self.debounce_generation += 1;
                    self.request_translation(&mut effects);
                }
            }
            Action::SourceLanguageChanged(code) => {
                if language::is_valid_source(&code) {
                    self.source_lang = code;
                    self.request_translation(&mut effects);
                } else {
                    self.set_status(
                        format!("Unsupported language: {code}"),
                        StatusKind::Error,
                        &mut effects,
                    );
                }
            }
            Action::TargetLanguageChanged(code) => {
                if language::is_valid_target(&code) {
                    self.target_lang = code;
                    self.request_translation(&mut effects);
                } else {
                    self.set_status(
                        format!("Unsupported language: {code}"),
                        StatusKind::Error,
                        &mut effects,
                    );
                }
            }
            Action::SwapLanguages => self.swap_languages(&mut effects),
            Action::Clear => {
                self.input_text.clear();
                self.output_text.clear();
                self.clear_status();
                self.supersede_in_flight();
                self.debounce_generation += 1;
                effects.push(Effect::FocusInput);
            }
            Action::CopyResult => {
                if self.output_text.is_empty() {
                    self.set_status(MSG_NOTHING_TO_COPY, StatusKind::Error, &mut effects);
                } else {
                    effects.push(Effect::CopyToClipboard(self.output_text.clone()));
                }
            }
            Action::TranslationFinished { seq, result } => {
                self.finish_translation(seq, result, &mut effects)
            }
            Action::CopyFinished(CopyOutcome::Copied) => {
                self.set_status(MSG_COPIED, StatusKind::Success, &mut effects);
            }
            Action::CopyFinished(CopyOutcome::Failed) => {
                self.set_status(MSG_COPY_FAILED, StatusKind::Error, &mut effects);
            }
            Action::StatusExpired { id } => {
                if id == self.status.id {
                    self.clear_status();
                }
            }
        }

        effects
    }

    fn request_translation(&mut self, effects: &mut Vec<Effect>) {
        let text = self.input_text.trim();

        if text.is_empty() {
            self.supersede_in_flight();
            self.output_text.clear();
            self.clear_status();
            return;
        }

        if self.source_lang == self.target_lang && !language::is_auto(&self.source_lang) {
            self.output_text = text.to_string();
            self.supersede_in_flight();
            self.set_status(MSG_SAME_LANGUAGE, StatusKind::None, effects);
            return;
        }

        self.latest_seq += 1;
        match TranslationRequest::new(
            self.latest_seq,
            &self.input_text,
            self.source_lang.as_str(),
            self.target_lang.as_str(),
        ) {
            Ok(request) => {
                tracing::debug!(
                    seq = request.seq,
                    source = %request.source,
                    target = %request.target,
                    "starting translation"
                );
                self.in_flight = true;
                self.set_status(MSG_TRANSLATING, StatusKind::Loading, effects);
                effects.push(Effect::Translate(request));
            }
            Err(e) => {
                self.in_flight = false;
                self.set_status(e.to_string(), StatusKind::Error, effects);
            }
        }
    }

    fn finish_translation(
        &mut self,
        seq: u64,
        result: Result<String, String>,
        effects: &mut Vec<Effect>,
    ) {
        if seq != self.latest_seq || !self.in_flight {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale translation");
            return;
        }

        self.in_flight = false;
        match result {
            Ok(text) => {
                self.output_text = text;
                self.set_status(MSG_COMPLETED, StatusKind::Success, effects);
            }
            Err(cause) => {
                tracing::debug!(seq, %cause, "translation failed");
                self.output_text.clear();
                self.set_status(MSG_FAILED, StatusKind::Error, effects);
            }
        }
    }

    fn swap_languages(&mut self, effects: &mut Vec<Effect>) {
        if language::is_auto(&self.source_lang) {
            self.set_status(MSG_SWAP_AUTO, StatusKind::Error, effects);
            return;
        }

        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        std::mem::swap(&mut self.input_text, &mut self.output_text);
        self.supersede_in_flight();
        self.debounce_generation += 1;

        if !self.input_text.trim().is_empty() {
            self.request_translation(effects);
        }
    }

    /// Any request still running loses the right to update the view
    fn supersede_in_flight(&mut self) {
        if self.in_flight {
            self.latest_seq += 1;
            self.in_flight = false;
        }
    }

    fn set_status(
        &mut self,
        message: impl Into<String>,
        kind: StatusKind,
        effects: &mut Vec<Effect>,
    ) {
        self.status = Status {
            message: message.into(),
            kind,
            id: self.status.id + 1,
        };

        if kind.is_transient() {
            effects.push(Effect::ScheduleStatusClear { id: self.status.id });
        }
    }

    fn clear_status(&mut self) {
        self.status = Status {
            message: String::new(),
            kind: StatusKind::None,
            id: self.status.id + 1,
        };
    }
}
