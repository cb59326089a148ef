use std::collections::VecDeque;

use log::{info, warn};

/// Entries kept for the events panel; older ones fall off the front.
pub const MAX_EVENTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
        }
    }
}

/// A single entry shown in the events panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine {
    pub level: Level,
    pub message: String,
}

/// Session events, mirrored to the log file as they are pushed.
#[derive(Debug, Default)]
pub struct EventLog {
    lines: VecDeque<EventLine>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Level::Warn, message.into());
    }

    fn push(&mut self, level: Level, message: String) {
        match level {
            Level::Info => info!("{message}"),
            Level::Warn => warn!("{message}"),
        }

        if self.lines.len() == MAX_EVENTS {
            self.lines.pop_front();
        }
        self.lines.push_back(EventLine { level, message });
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &EventLine> {
        self.lines.iter().skip(self.lines.len().saturating_sub(n))
    }
}
