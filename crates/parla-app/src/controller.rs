use std::sync::{Arc, Mutex};

use kanal::{AsyncReceiver, AsyncSender};
use parla_io::clipboard::ClipboardService;
use parla_translator::Translator;
use parla_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity * 4), // renders burst while typing
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, channel_capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(channel_capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        translator: Arc<dyn Translator>,
        clipboard: Arc<Mutex<ClipboardService>>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            translator,
            clipboard,
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
