//! Navigation history stack.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::navigation::request::Params;

/// Snapshot of a route identity. The definition is looked up again on restore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,

    #[serde(default)]
    pub params: Params,
}

/// Past route identities, newest last.
///
/// Grows by one entry per successful forward navigation and shrinks by one
/// entry per back navigation. Nothing else touches it.
#[derive(Debug, Default)]
pub struct HistoryStack {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry. Returns the new depth.
    pub fn push(&self, entry: HistoryEntry) -> usize {
        let mut entries = self.lock();
        entries.push(entry);
        entries.len()
    }

    /// Remove and return the newest entry.
    pub fn pop(&self) -> Option<HistoryEntry> {
        self.lock().pop()
    }

    pub fn last(&self) -> Option<HistoryEntry> {
        self.lock().last().cloned()
    }

    /// Copy of the whole stack, oldest first.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
