use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use parla_config::Config;
use parla_core::TranslationRequest;
use parla_io::clipboard::{ClipboardBackend, ClipboardService};
use parla_translator::{ProviderMetadata, TranslateError, Translation, Translator};
use parla_types::{AppEvent, ViewState};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;

type Reply = Box<dyn Fn(&TranslationRequest) -> (Duration, Result<String, ()>) + Send + Sync>;

/// Translator double that records every request it receives
pub struct FakeTranslator {
    reply: Reply,
    pub requests: Mutex<Vec<TranslationRequest>>,
}

impl FakeTranslator {
    pub fn new<F>(reply: F) -> Arc<Self>
    where
        F: Fn(&TranslationRequest) -> (Duration, Result<String, ()>) + Send + Sync + 'static,
    {
        Arc::new(Self {
            reply: Box::new(reply),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answers immediately with the upper-cased input
    pub fn uppercase() -> Arc<Self> {
        Self::new(|req| (Duration::ZERO, Ok(req.text.to_uppercase())))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(|_| (Duration::ZERO, Err(())))
    }

    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        self.requests.lock().unwrap().push(request.clone());

        let (delay, reply) = (self.reply)(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Ok(text) => Ok(Translation {
                text,
                provider: "fake".to_string(),
                confidence: None,
            }),
            Err(()) => Err(TranslateError::AllProvidersFailed),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fake".to_string(),
        }
    }
}

pub struct RecordingClipboard {
    pub copied: Arc<Mutex<Vec<String>>>,
}

impl ClipboardBackend for RecordingClipboard {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clipboard that refuses every write
pub struct BrokenClipboard;

impl ClipboardBackend for BrokenClipboard {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn set_text(&mut self, _text: &str) -> anyhow::Result<()> {
        anyhow::bail!("clipboard unavailable")
    }
}

pub struct Harness {
    pub ui_tx: AsyncSender<AppEvent>,
    pub ui_rx: AsyncReceiver<AppEvent>,
    pub copied: Arc<Mutex<Vec<String>>>,
    pub cancel: CancellationToken,
    pub task: JoinHandle<anyhow::Result<()>>,
    // keeps frames readable after the event loop has exited
    _app_tx: AsyncSender<AppEvent>,
}

impl Harness {
    /// Event loop with a clipboard that records what it receives
    pub fn start(config: Config, translator: Arc<dyn Translator>) -> Self {
        let copied = Arc::new(Mutex::new(Vec::new()));
        let clipboard = ClipboardService::new(vec![Box::new(RecordingClipboard {
            copied: copied.clone(),
        })]);

        Self::start_with_clipboard(config, translator, clipboard, copied)
    }

    pub fn start_with_clipboard(
        config: Config,
        translator: Arc<dyn Translator>,
        clipboard: ClipboardService,
        copied: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        let (ui_tx, app_rx) = kanal::bounded_async(64);
        let (app_tx, ui_rx) = kanal::bounded_async(256);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(event_loop(
            Arc::new(AppState::new(config)),
            app_rx,
            app_tx.clone(),
            translator,
            Arc::new(Mutex::new(clipboard)),
            cancel.clone(),
        ));

        Self {
            ui_tx,
            ui_rx,
            copied,
            cancel,
            task,
            _app_tx: app_tx,
        }
    }

    pub async fn send(&self, event: AppEvent) {
        self.ui_tx.send(event).await.expect("event loop gone");
    }

    /// Next rendered frame matching `pred`; frames before it are skipped
    pub async fn wait_for<F>(&self, pred: F) -> ViewState
    where
        F: Fn(&ViewState) -> bool,
    {
        let result = timeout(Duration::from_secs(30), async {
            loop {
                match self.ui_rx.recv().await.expect("event loop gone") {
                    AppEvent::Render(view) if pred(&view) => return view,
                    _ => {}
                }
            }
        })
        .await;

        result.expect("timed out waiting for a matching frame")
    }

    pub async fn wait_for_focus(&self) {
        timeout(Duration::from_secs(30), async {
            while !matches!(
                self.ui_rx.recv().await.expect("event loop gone"),
                AppEvent::FocusInput
            ) {}
        })
        .await
        .expect("timed out waiting for focus");
    }
}

pub fn config_with(pairs: &[(&str, &str)]) -> Config {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
}
