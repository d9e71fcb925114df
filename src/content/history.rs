use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::identity::Session;

use super::{RenderHook, ViewContent};

/// One row of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub time: String,
    pub sensor: String,
    pub event: String,
    pub status: String,
    pub notes: String,
}

/// A log entry formatted for the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub entry: HistoryEntry,
    pub status_class: &'static str,
}

fn status_class(status: &str) -> &'static str {
    match status {
        "Active" | "Clear" => "status-active",
        "Inactive" | "Detected" | "Not Clear" => "status-obstructed",
        _ => "status-info",
    }
}

/// Bounded, newest-first event log.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    capacity: usize,
    entries: VecDeque<HistoryEntry>,
}

pub type SharedHistory = Arc<Mutex<HistoryLog>>;

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, entries: VecDeque::with_capacity(capacity) }
    }

    pub fn shared(capacity: usize) -> SharedHistory {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    /// Put a batch at the front, keeping the batch's own order, then trim the oldest.
    pub fn push_batch(&mut self, batch: Vec<HistoryEntry>) {
        for e in batch.into_iter().rev() {
            self.entries.push_front(e);
        }
        self.entries.truncate(self.capacity);
    }

    pub fn capacity(&self) -> usize { self.capacity }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn rows(&self) -> Vec<HistoryRow> {
        self.entries
            .iter()
            .map(|e| HistoryRow { entry: e.clone(), status_class: status_class(&e.status) })
            .collect()
    }
}

/// Renders the history table from the shared log.
pub struct HistoryHook {
    log: SharedHistory,
}

impl HistoryHook {
    pub fn new(log: SharedHistory) -> Self { Self { log } }
}

impl RenderHook for HistoryHook {
    fn render(&mut self, _session: Option<&Session>) -> ViewContent {
        ViewContent::History(self.log.lock().rows())
    }
}
