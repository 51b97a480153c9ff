#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Input text replaced by the user, translated after the quiet period
    TextInput(String),
    /// Explicit translate trigger (button / Ctrl+Enter)
    TranslateRequested,
    SourceLanguageChanged(String),
    TargetLanguageChanged(String),
    SwapLanguages,
    Clear,
    CopyResult,
    UiEvent(UiEvent),
    /// Fresh snapshot for the frontend to draw
    Render(ViewState),
    FocusInput,
    BackendReady,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Show,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    None,
    Loading,
    Success,
    Error,
}

impl StatusKind {
    /// Success and error messages are only shown for a short window
    pub fn is_transient(self) -> bool {
        matches!(self, StatusKind::Success | StatusKind::Error)
    }
}

/// Everything the frontend needs to draw one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub source_lang: String,
    pub target_lang: String,
    pub input_text: String,
    pub output_text: String,
    pub status_message: String,
    pub status_kind: StatusKind,
    pub translate_enabled: bool,
}
