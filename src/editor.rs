// Seam between edkit commands and the host editor

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

/// What a command may ask of the editor it runs in
pub trait EditorHost {
    /// Switch the active editing surface to `path`
    fn open(&mut self, path: &Path) -> Result<()>;

    /// Show a message to the user
    fn notify(&mut self, level: NotifyLevel, message: &str);

    /// Insert text at the cursor
    fn insert_text(&mut self, text: &str) -> Result<()>;

    /// Put text on the system clipboard
    fn set_clipboard(&mut self, text: &str) -> Result<()>;
}

/// Route a command result: recoverable errors become a notification and
/// `Ok(None)`, fatal ones propagate.
pub fn report<T>(host: &mut dyn EditorHost, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Command did not complete");
            host.notify(NotifyLevel::Warn, &e.to_string());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Host used by the CLI: results go to stdout, messages to stderr
pub struct StdioHost<W: Write> {
    out: W,
}

impl StdioHost<std::io::Stdout> {
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl Default for StdioHost<std::io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdioHost<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EditorHost for StdioHost<W> {
    fn open(&mut self, path: &Path) -> Result<()> {
        writeln!(self.out, "{}", path.display())?;
        Ok(())
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        info!(?level, "{message}");
        match level {
            NotifyLevel::Info => eprintln!("{message}"),
            NotifyLevel::Warn => eprintln!("warning: {message}"),
            NotifyLevel::Error => eprintln!("error: {message}"),
        }
    }

    fn insert_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn set_clipboard(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}

/// Host that records every request, for embedding and tests
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub opened: Vec<PathBuf>,
    pub messages: Vec<(NotifyLevel, String)>,
    pub inserted: Vec<String>,
    pub clipboard: Option<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no command changed editor state
    pub fn untouched(&self) -> bool {
        self.opened.is_empty() && self.inserted.is_empty() && self.clipboard.is_none()
    }
}

impl EditorHost for RecordingHost {
    fn open(&mut self, path: &Path) -> Result<()> {
        self.opened.push(path.to_path_buf());
        Ok(())
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        self.messages.push((level, message.to_string()));
    }

    fn insert_text(&mut self, text: &str) -> Result<()> {
        self.inserted.push(text.to_string());
        Ok(())
    }

    fn set_clipboard(&mut self, text: &str) -> Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}
