//! Destinations for human-readable progress and summary lines
//!
//! Structured diagnostics go through `tracing`; the sink carries the text an
//! operator reads (per-page progress and the end-of-run summary).

use std::sync::Mutex;

/// Receives human-readable output lines
pub trait ReportSink: Send + Sync {
    /// Emits one block of text (may contain newlines)
    fn emit(&self, text: &str);
}

/// Writes every block to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, text: &str) {
        println!("{}", text);
    }
}

/// Keeps every block in memory, in emission order
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// All emitted blocks joined with newlines
    pub fn contents(&self) -> String {
        self.lines().join("\n")
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, text: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(text.to_string());
    }
}
