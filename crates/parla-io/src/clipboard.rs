use std::io::{self, Write};

use anyhow::{Context, bail};
use arboard::Clipboard;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Something that can receive text for the user's clipboard
pub trait ClipboardBackend: Send {
    fn name(&self) -> &'static str;

    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Platform clipboard via arboard.
///
/// The handle is opened lazily and kept alive: on X11 the copied text is only
/// served while its owner exists.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().context("platform clipboard unavailable")?);
        }

        if let Some(clipboard) = self.inner.as_mut()
            && let Err(e) = clipboard.set_text(text)
        {
            // a broken handle is reopened on the next attempt
            self.inner = None;
            return Err(e).context("platform clipboard rejected text");
        }

        Ok(())
    }
}

/// Legacy path: ask the terminal emulator to set the clipboard (OSC 52)
pub struct TerminalClipboard<W: Write + Send> {
    out: W,
    is_tty: bool,
}

impl TerminalClipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            is_tty: atty::is(atty::Stream::Stdout),
        }
    }
}

impl<W: Write + Send> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out, is_tty: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write + Send> ClipboardBackend for TerminalClipboard<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        if !self.is_tty {
            bail!("stdout is not a terminal");
        }

        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Tries each backend in order and stops at the first that accepts the text
pub struct ClipboardService {
    backends: Vec<Box<dyn ClipboardBackend>>,
}

impl ClipboardService {
    pub fn new(backends: Vec<Box<dyn ClipboardBackend>>) -> Self {
        Self { backends }
    }

    /// Platform clipboard first, terminal escape as the fallback
    pub fn platform_default() -> Self {
        Self::new(vec![
            Box::new(SystemClipboard::new()),
            Box::new(TerminalClipboard::stdout()),
        ])
    }

    /// Returns the name of the backend that took the text
    pub fn copy(&mut self, text: &str) -> anyhow::Result<&'static str> {
        let mut last_error = None;

        for backend in self.backends.iter_mut() {
            match backend.set_text(text) {
                Ok(()) => {
                    tracing::debug!("copied {} chars via {} clipboard", text.len(), backend.name());
                    return Ok(backend.name());
                }
                Err(e) => {
                    tracing::warn!("{} clipboard failed: {:#}", backend.name(), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e.context("no clipboard backend accepted the text")),
            None => bail!("no clipboard backend configured"),
        }
    }
}
