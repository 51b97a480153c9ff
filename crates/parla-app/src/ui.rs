//! Line-oriented terminal frontend.
//!
//! A plain line replaces the input text and is translated once typing pauses;
//! lines starting with `:` are commands. Stdin is read on a dedicated thread
//! so a pending read never holds up runtime shutdown.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use kanal::{AsyncReceiver, AsyncSender, Sender};
use parla_core::language;
use parla_types::{AppEvent, StatusKind, UiEvent, ViewState};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
Type text and press Enter to translate it.
  :translate      translate now
  :from <code>    set source language (auto allowed)
  :to <code>      set target language
  :swap           swap languages and texts
  :clear          clear everything
  :copy           copy the translation
  :langs          list language codes
  :help           show this help
  :quit           exit
Start a line with '::' to translate text beginning with ':'.";

#[derive(Debug, Clone)]
pub enum Command {
    Send(AppEvent),
    Help,
    Languages,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    if let Some(text) = line.strip_prefix("::") {
        return Command::Send(AppEvent::TextInput(format!(":{text}")));
    }

    let Some(command) = line.strip_prefix(':') else {
        return Command::Send(AppEvent::TextInput(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let event = match (name, arg) {
        ("translate" | "t", None) => AppEvent::TranslateRequested,
        ("from", Some(code)) => AppEvent::SourceLanguageChanged(code.to_lowercase()),
        ("to", Some(code)) => AppEvent::TargetLanguageChanged(code.to_lowercase()),
        ("from" | "to", None) => {
            return Command::Invalid(format!("usage: :{name} <code>"));
        }
        ("swap", None) => AppEvent::SwapLanguages,
        ("clear", None) => AppEvent::Clear,
        ("copy", None) => AppEvent::CopyResult,
        ("langs", None) => return Command::Languages,
        ("help" | "h", None) => return Command::Help,
        ("quit" | "q", None) => AppEvent::UiEvent(UiEvent::Close),
        _ => return Command::Invalid(format!("unknown command ':{command}', try :help")),
    };

    Command::Send(event)
}

pub fn languages_table() -> String {
    let mut out = String::new();
    for lang in language::source_languages() {
        let _ = writeln!(out, "  {:<5} {}", lang.code, lang.display_name);
    }
    out
}

fn styled_status(view: &ViewState, colored: bool) -> String {
    let message = view.status_message.as_str();
    if !colored {
        return message.to_string();
    }
    match view.status_kind {
        StatusKind::None => message.to_string(),
        StatusKind::Loading => message.yellow().to_string(),
        StatusKind::Success => message.green().to_string(),
        StatusKind::Error => message.red().to_string(),
    }
}

/// Draws only what changed since the previous frame
#[derive(Default)]
pub struct Renderer {
    last: Option<ViewState>,
    colored: bool,
}

impl Renderer {
    pub fn new(colored: bool) -> Self {
        Self {
            last: None,
            colored,
        }
    }

    pub fn frame(&mut self, view: ViewState) -> Vec<String> {
        let mut lines = Vec::new();
        let last = self.last.take().unwrap_or_default();

        let langs_changed =
            view.source_lang != last.source_lang || view.target_lang != last.target_lang;
        let status_changed =
            view.status_message != last.status_message || view.status_kind != last.status_kind;
        let busy_changed = view.translate_enabled != last.translate_enabled;

        if langs_changed || busy_changed || (status_changed && !view.status_message.is_empty()) {
            let mut header = format!(
                "[{} -> {}]",
                language::display_name(&view.source_lang),
                language::display_name(&view.target_lang)
            );
            if !view.translate_enabled {
                // :translate is ignored until the running request settles
                header.push_str(" (busy)");
            }
            if view.status_message.is_empty() {
                lines.push(header);
            } else {
                lines.push(format!("{header} {}", styled_status(&view, self.colored)));
            }
        }

        if view.output_text != last.output_text && !view.output_text.is_empty() {
            lines.push(format!("=> {}", view.output_text));
        }

        self.last = Some(view);
        lines
    }
}

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    spawn_input_reader(io::BufReader::new(io::stdin()), ui_to_app_tx.clone().to_sync())?;

    let mut renderer = Renderer::new(atty::is(atty::Stream::Stdout));

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        match event {
            AppEvent::BackendReady => {
                tracing::debug!("[UI] Backend ready");
                println!("parla: type text to translate, :help for commands");
            }
            AppEvent::Render(view) => {
                for line in renderer.frame(view) {
                    println!("{line}");
                }
            }
            AppEvent::FocusInput => {
                print!("> ");
                io::stdout().flush()?;
            }
            _ => {}
        }
    }

    tracing::debug!("[UI] loop stopped");
    Ok(())
}

/// Feeds parsed lines to the app from a dedicated thread; EOF closes the app
pub fn spawn_input_reader<R>(input: R, tx: Sender<AppEvent>) -> io::Result<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("parla-input".into())
        .spawn(move || {
            for line in input.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("stdin read failed: {}", e);
                        break;
                    }
                };

                match parse_line(&line) {
                    Command::Send(event) => {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                    Command::Help => println!("{HELP}"),
                    Command::Languages => print!("{}", languages_table()),
                    Command::Invalid(message) => println!("{message}"),
                }
            }

            // EOF behaves like :quit
            let _ = tx.send(AppEvent::UiEvent(UiEvent::Close));
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(line: &str) -> AppEvent {
        match parse_line(line) {
            Command::Send(event) => event,
            other => panic!("expected an event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_line_is_text_input() {
        assert!(matches!(sent("Hola mundo"), AppEvent::TextInput(t) if t == "Hola mundo"));
        assert!(matches!(sent(""), AppEvent::TextInput(t) if t.is_empty()));
    }

    #[test]
    fn test_double_colon_escapes_text() {
        assert!(matches!(sent("::) smile"), AppEvent::TextInput(t) if t == ":) smile"));
    }

    #[test]
    fn test_commands() {
        assert!(matches!(sent(":translate"), AppEvent::TranslateRequested));
        assert!(matches!(sent(":swap"), AppEvent::SwapLanguages));
        assert!(matches!(sent(":clear"), AppEvent::Clear));
        assert!(matches!(sent(":copy"), AppEvent::CopyResult));
        assert!(matches!(sent(":q"), AppEvent::UiEvent(UiEvent::Close)));
        assert!(matches!(sent(":from EN"), AppEvent::SourceLanguageChanged(c) if c == "en"));
        assert!(matches!(sent(":to fr"), AppEvent::TargetLanguageChanged(c) if c == "fr"));
        assert!(matches!(parse_line(":langs"), Command::Languages));
        assert!(matches!(parse_line(":help"), Command::Help));
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse_line(":to"), Command::Invalid(m) if m == "usage: :to <code>"));
        assert!(matches!(parse_line(":dance"), Command::Invalid(_)));
        assert!(matches!(parse_line(":swap now"), Command::Invalid(_)));
    }

    #[test]
    fn test_languages_table_lists_catalog() {
        let table = languages_table();
        assert_eq!(table.lines().count(), 30);
        assert!(table.contains("auto  Auto Detect"));
    }

    fn view(status: &str, kind: StatusKind, output: &str) -> ViewState {
        let translate_enabled = kind != StatusKind::Loading;
        ViewState {
            source_lang: "es".to_string(),
            target_lang: "en".to_string(),
            input_text: "Hola".to_string(),
            output_text: output.to_string(),
            status_message: status.to_string(),
            status_kind: kind,
            translate_enabled,
        }
    }

    #[test]
    fn test_renderer_draws_changes_only() {
        let mut renderer = Renderer::new(false);

        assert_eq!(renderer.frame(view("", StatusKind::None, "")), vec!["[Spanish -> English]"]);
        assert_eq!(
            renderer.frame(view("Translating...", StatusKind::Loading, "")),
            vec!["[Spanish -> English] (busy) Translating..."]
        );
        assert_eq!(
            renderer.frame(view("Translation completed", StatusKind::Success, "Hello")),
            vec!["[Spanish -> English] Translation completed", "=> Hello"]
        );
        // status expiry alone draws nothing
        assert!(renderer.frame(view("", StatusKind::None, "Hello")).is_empty());
    }
}
