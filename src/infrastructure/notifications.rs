use std::sync::Mutex;

use crate::domain::ports::NotificationSink;

/// Logs every message and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn emit_error(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// Buffers messages until the UI drains them.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<Vec<String>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.pending.lock() {
            Ok(pending) => pending.is_empty(),
            Err(poisoned) => poisoned.into_inner().is_empty(),
        }
    }
}

impl NotificationSink for NotificationQueue {
    fn emit_error(&self, message: &str) {
        LogNotifier.emit_error(message);
        match self.pending.lock() {
            Ok(mut pending) => pending.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
