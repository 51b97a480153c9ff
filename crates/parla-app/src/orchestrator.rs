use std::sync::{Arc, Mutex};
use std::time::Duration;

use kanal::AsyncSender;
use parla_config::Config;
use parla_core::{Action, CopyOutcome, Effect, TranslationRequest, TranslationState};
use parla_io::clipboard::ClipboardService;
use parla_translator::Translator;
use parla_types::AppEvent;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub debounce: Duration,
    pub status_display: Duration,
}

impl Timings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.ui.debounce(),
            status_display: config.ui.status_display(),
        }
    }
}

/// Owns the translation state and carries out the effects it asks for.
///
/// Timers, provider calls and clipboard writes run as spawned tasks that
/// report back through `action_tx`; the state itself is only touched from the
/// task calling [`Orchestrator::dispatch`].
pub struct Orchestrator {
    state: TranslationState,
    translator: Arc<dyn Translator>,
    clipboard: Arc<Mutex<ClipboardService>>,
    timings: Timings,
    action_tx: AsyncSender<Action>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    debounce_task: Option<JoinHandle<()>>,
}

impl Orchestrator {
    pub fn new(
        state: TranslationState,
        translator: Arc<dyn Translator>,
        clipboard: Arc<Mutex<ClipboardService>>,
        timings: Timings,
        action_tx: AsyncSender<Action>,
        app_to_ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            state,
            translator,
            clipboard,
            timings,
            action_tx,
            app_to_ui_tx,
            debounce_task: None,
        }
    }

    pub async fn render(&self) -> anyhow::Result<()> {
        self.app_to_ui_tx
            .send(AppEvent::Render(self.state.view()))
            .await?;
        Ok(())
    }

    /// Apply one action, run its effects and push a new frame if anything changed
    pub async fn dispatch(&mut self, action: Action) -> anyhow::Result<()> {
        tracing::trace!(?action, "dispatch");
        let before = self.state.view();

        let effects = self.state.apply(action);
        for effect in effects {
            self.run_effect(effect).await?;
        }

        if self.state.view() != before {
            self.render().await?;
        }

        Ok(())
    }

    async fn run_effect(&mut self, effect: Effect) -> anyhow::Result<()> {
        match effect {
            Effect::Translate(request) => self.spawn_translation(request),
            Effect::ScheduleDebounce { generation } => {
                // only the newest timer may fire
                if let Some(previous) = self.debounce_task.take() {
                    previous.abort();
                }
                self.debounce_task = Some(self.schedule(
                    self.timings.debounce,
                    Action::DebounceFired { generation },
                ));
            }
            Effect::ScheduleStatusClear { id } => {
                self.schedule(self.timings.status_display, Action::StatusExpired { id });
            }
            Effect::CopyToClipboard(text) => self.spawn_copy(text),
            Effect::FocusInput => {
                self.app_to_ui_tx.send(AppEvent::FocusInput).await?;
            }
        }

        Ok(())
    }

    fn schedule(&self, delay: Duration, action: Action) -> JoinHandle<()> {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tx.send(action).await {
                tracing::debug!("timer fired after shutdown: {}", e);
            }
        })
    }

    fn spawn_translation(&self, request: TranslationRequest) {
        let translator = self.translator.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let seq = request.seq;
            let result = match translator.translate(&request).await {
                Ok(translation) => {
                    tracing::info!(
                        seq,
                        provider = %translation.provider,
                        confidence = ?translation.confidence,
                        "translated {} chars",
                        request.text.chars().count()
                    );
                    Ok(translation.text)
                }
                Err(e) => {
                    tracing::error!(seq, "translation failed: {}", e);
                    Err(e.to_string())
                }
            };

            if let Err(e) = tx.send(Action::TranslationFinished { seq, result }).await {
                tracing::debug!("translation finished after shutdown: {}", e);
            }
        });
    }

    fn spawn_copy(&self, text: String) {
        let clipboard = self.clipboard.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let copied = tokio::task::spawn_blocking(move || -> anyhow::Result<&'static str> {
                let mut service = clipboard
                    .lock()
                    .map_err(|_| anyhow::anyhow!("clipboard lock poisoned"))?;
                service.copy(&text)
            })
            .await;

            let outcome = match copied {
                Ok(Ok(backend)) => {
                    tracing::info!("translation copied via {} clipboard", backend);
                    CopyOutcome::Copied
                }
                Ok(Err(e)) => {
                    tracing::error!("copy failed: {:#}", e);
                    CopyOutcome::Failed
                }
                Err(e) => {
                    tracing::error!("copy task panicked: {}", e);
                    CopyOutcome::Failed
                }
            };

            if let Err(e) = tx.send(Action::CopyFinished(outcome)).await {
                tracing::debug!("copy finished after shutdown: {}", e);
            }
        });
    }
}
