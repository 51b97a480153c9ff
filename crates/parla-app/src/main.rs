use std::sync::{Arc, Mutex};

use clap::Parser;
use parla_config::Config;
use parla_io::clipboard::ClipboardService;
use parla_translator::{LibreTranslator, MyMemoryTranslator, ProviderChain, Translator, http_client};
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod orchestrator;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Translate text from the terminal, with a fallback provider
#[derive(Parser, Debug)]
#[command(name = "parla", version)]
struct Args {
    /// Source language code, or "auto"
    #[arg(long)]
    from: Option<String>,

    /// Target language code
    #[arg(long)]
    to: Option<String>,

    /// Quiet period before translating typed text
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(from) = &self.from {
            config.ui.source_lang = from.to_lowercase();
        }
        if let Some(to) = &self.to {
            config.ui.target_lang = to.to_lowercase();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.ui.debounce_ms = debounce_ms;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

/// Primary MyMemory, then LibreTranslate
pub fn build_provider_chain(config: &Config) -> anyhow::Result<ProviderChain> {
    let client = http_client(config.translator.request_timeout())?;

    let primary = MyMemoryTranslator::new(client.clone(), config.translator.primary_url.clone());
    let secondary = LibreTranslator::new(client, config.translator.secondary_url.clone())
        .with_api_key(config.translator.secondary_api_key.clone());

    Ok(ProviderChain::new(vec![Arc::new(primary), Arc::new(secondary)]))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut config = Config::new();
    args.apply(&mut config);
    config.validate()?;

    let chain = build_provider_chain(&config)?;
    tracing::info!(
        "providers: {}, request timeout {}ms",
        chain.metadata().name,
        config.translator.request_timeout_ms
    );

    let channel_capacity = config.channel_capacity;
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state, channel_capacity);

    let clipboard = Arc::new(Mutex::new(ClipboardService::platform_default()));
    let mut tasks = controller.spawn_tasks(Arc::new(chain), clipboard);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task exited"),
                Ok(Err(e)) => tracing::error!("task failed: {:#}", e),
                Err(e) => tracing::error!("task panicked: {}", e),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::warn!("task ended with error during shutdown: {:#}", e);
        }
    }

    Ok(())
}
