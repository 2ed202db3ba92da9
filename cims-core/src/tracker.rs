//! Session-scoped list of timing entries.
//!
//! Entries are kept in submission order and never removed. Pending entries are
//! closed strictly oldest-first, one per call.

use crate::entry::{Entry, LogRow};
use chrono::{Local, NaiveDateTime};

#[derive(Debug, Default)]
pub struct EntryTracker {
    entries: Vec<Entry>,
    user: Option<String>,
}

impl EntryTracker {
    /// A tracker whose entries are attributed to `user`.
    pub fn new(user: Option<String>) -> Self {
        Self {
            entries: Vec::new(),
            user,
        }
    }

    /// Starts timing `identifier` now. See [`EntryTracker::submit_at`].
    pub fn submit(&mut self, identifier: &str) -> Option<&Entry> {
        self.submit_at(identifier, Local::now().naive_local())
    }

    /// Starts timing `identifier` at `start_time`.
    ///
    /// The identifier is trimmed first; blank input creates nothing and returns `None`.
    /// Duplicates are tracked as independent entries.
    pub fn submit_at(&mut self, identifier: &str, start_time: NaiveDateTime) -> Option<&Entry> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }
        tracing::debug!(identifier, %start_time, "entry started");
        self.entries.push(Entry::pending(
            identifier.to_string(),
            self.user.clone(),
            start_time,
        ));
        self.entries.last()
    }

    /// Completes the oldest pending entry now. See [`EntryTracker::complete_oldest_at`].
    pub fn complete_oldest(&mut self) -> Option<LogRow> {
        self.complete_oldest_at(Local::now().naive_local())
    }

    /// Completes the oldest pending entry, stamping `end_time`.
    ///
    /// Returns the row to persist, or `None` when nothing is pending.
    pub fn complete_oldest_at(&mut self, end_time: NaiveDateTime) -> Option<LogRow> {
        let entry = self.entries.iter_mut().find(|e| e.is_pending())?;
        let row = entry.complete(end_time)?;
        tracing::debug!(
            identifier = %row.identifier,
            duration_secs = row.duration_secs,
            "entry completed"
        );
        Some(row)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_pending())
    }

    pub fn completed(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.is_pending())
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}
