//! The shared notification log.
//!
//! Every `CarService` operation appends exactly one human-readable entry
//! here describing its outcome. The log is append-only and ordered by
//! arrival; a UI renders it as-is and tests read it back through
//! `messages()`.

use std::sync::Mutex;

/// Append-only, ordered diagnostic log shared between the service and its
/// observers.
///
/// Interior mutability lets a single `Arc<MessageLog>` be held by the
/// composition root, the service, and any number of readers.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Mutex<Vec<String>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message. Entries are never reordered or rewritten.
    pub fn add(&self, message: impl Into<String>) {
        self.entries.lock().unwrap().push(message.into());
    }

    /// Snapshot of all entries in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Discard all entries. Exposed for the UI's "clear messages" action.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
