//! Recording collaborators for command tests

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::command::{Clipboard, Notifier};

#[derive(Debug, Default)]
pub(super) struct RecordingClipboard {
    pub(super) writes: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write(&self, text: &str) {
        self.writes.lock().push(text.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Default)]
pub(super) struct RecordingNotifier {
    pub(super) messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    pub(super) fn levels(&self) -> Vec<Level> {
        self.messages.lock().iter().map(|(level, _)| *level).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.messages.lock().push((Level::Info, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.messages.lock().push((Level::Warn, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages.lock().push((Level::Error, message.to_string()));
    }
}
