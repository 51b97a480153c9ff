use std::sync::{Arc, Mutex};

use kanal::{AsyncReceiver, AsyncSender};
use parla_core::{Action, TranslationState};
use parla_io::clipboard::ClipboardService;
use parla_translator::Translator;
use parla_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::orchestrator::{Orchestrator, Timings};
use crate::state::AppState;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    translator: Arc<dyn Translator>,
    clipboard: Arc<Mutex<ClipboardService>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (timings, translation_state) = {
        let config = state.config.read().await;
        (
            Timings::from_config(&config),
            TranslationState::new(config.ui.source_lang.clone(), config.ui.target_lang.clone()),
        )
    };

    // timers and provider calls report back here
    let (action_tx, action_rx) = kanal::unbounded_async::<Action>();

    let mut orchestrator = Orchestrator::new(
        translation_state,
        translator,
        clipboard,
        timings,
        action_tx,
        app_to_ui_tx.clone(),
    );

    app_to_ui_tx.send(AppEvent::BackendReady).await?;
    orchestrator.render().await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[EVENT_LOOP] Frontend channel closed");
                    break;
                };
                handle_events(&mut orchestrator, &cancel, event).await?;
            }
            action = action_rx.recv() => {
                orchestrator.dispatch(action?).await?;
            }
        }
    }

    Ok(())
}

async fn handle_events(
    orchestrator: &mut Orchestrator,
    cancel: &CancellationToken,
    event: AppEvent,
) -> anyhow::Result<()> {
    tracing::debug!("[EVENT_LOOP] EVENT RECEIVED: {:?}", std::mem::discriminant(&event));

    let action = match event {
        AppEvent::TextInput(text) => Action::InputChanged(text),
        AppEvent::TranslateRequested => Action::TranslateRequested,
        AppEvent::SourceLanguageChanged(code) => Action::SourceLanguageChanged(code),
        AppEvent::TargetLanguageChanged(code) => Action::TargetLanguageChanged(code),
        AppEvent::SwapLanguages => Action::SwapLanguages,
        AppEvent::Clear => Action::Clear,
        AppEvent::CopyResult => Action::CopyResult,
        AppEvent::UiEvent(UiEvent::Show) => {
            return orchestrator.render().await;
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            cancel.cancel();
            return Ok(());
        }
        AppEvent::Render(_) | AppEvent::FocusInput | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
            return Ok(());
        }
    };

    orchestrator.dispatch(action).await
}
