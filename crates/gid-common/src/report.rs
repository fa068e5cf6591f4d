//! Injectable progress and diagnostic reporting.
//!
//! Pipeline stages never print directly. They receive a `&dyn Reporter` and
//! describe what happened through it; the CLI decides whether that ends up on
//! the console, in the `tracing` stream, or nowhere at all.

use std::sync::Mutex;

/// Severity of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Note,
    Warn,
    Fail,
    Preview,
}

/// A message captured by [`MemoryReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

/// Receiver for human-readable pipeline progress.
pub trait Reporter {
    /// Progress or success information.
    fn note(&self, message: &str);

    /// A recoverable problem; the stage continues.
    fn warn(&self, message: &str);

    /// A problem that aborts the current stage.
    fn fail(&self, message: &str);

    /// A rendered multi-line table shown for operator sanity-checking.
    fn preview(&self, title: &str, rendered: &str) {
        self.note(&format!("{title}\n{rendered}"));
    }
}

/// Forwards every message to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn note(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn fail(&self, message: &str) {
        tracing::error!("{message}");
    }

    fn preview(&self, title: &str, rendered: &str) {
        tracing::info!(title, "\n{rendered}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn note(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn fail(&self, _message: &str) {}

    fn preview(&self, _title: &str, _rendered: &str) {}
}

/// Records messages in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<Message>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded messages in order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the texts recorded at `level`.
    pub fn texts(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|message| message.level == level)
            .map(|message| message.text)
            .collect()
    }

    /// Returns true if any message at `level` contains `needle`.
    pub fn contains(&self, level: MessageLevel, needle: &str) -> bool {
        self.texts(level).iter().any(|text| text.contains(needle))
    }

    fn push(&self, level: MessageLevel, text: String) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(Message { level, text });
        }
    }
}

impl Reporter for MemoryReporter {
    fn note(&self, message: &str) {
        self.push(MessageLevel::Note, message.to_string());
    }

    fn warn(&self, message: &str) {
        self.push(MessageLevel::Warn, message.to_string());
    }

    fn fail(&self, message: &str) {
        self.push(MessageLevel::Fail, message.to_string());
    }

    fn preview(&self, title: &str, rendered: &str) {
        self.push(MessageLevel::Preview, format!("{title}\n{rendered}"));
    }
}
