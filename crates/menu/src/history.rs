use crate::store::StateStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Days an item stays off the menu after being shown.
pub const REPEAT_WINDOW_DAYS: i64 = 7;

/// Storage key for the persisted history blob.
pub const HISTORY_KEY: &str = "menu_history";

/// One past selection event for a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub item: String,
    pub timestamp: DateTime<Utc>,
}

/// Past selections per category key.
///
/// Repeated picks of the same item append entries rather than replacing them;
/// eligibility only asks whether any entry for the item sits inside the
/// repeat window. Entries older than the window are dropped whenever their
/// category is touched by a new selection, never on a timer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryStore {
    categories: HashMap<String, Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn entries(&self, category: &str) -> &[HistoryEntry] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn push(&mut self, category: &str, entry: HistoryEntry) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .push(entry);
    }

    /// Drop every entry for `category` older than `cutoff`.
    pub fn prune(&mut self, category: &str, cutoff: DateTime<Utc>) {
        if let Some(entries) = self.categories.get_mut(category) {
            entries.retain(|e| e.timestamp >= cutoff);
        }
    }

    pub fn clear(&mut self, category: &str) {
        self.categories.remove(category);
    }

    pub fn clear_all(&mut self) {
        self.categories.clear();
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Answers "which candidates are eligible today" and records new selections.
#[derive(Debug, Clone, Default)]
pub struct HistoryTracker {
    history: HistoryStore,
}

impl HistoryTracker {
    /// Load the tracker from persisted state.
    ///
    /// Absent or malformed state yields an empty history; the failure is
    /// logged and otherwise swallowed.
    pub fn load<S: StateStore>(store: &S) -> Self {
        let raw = match store.load(HISTORY_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read menu history, starting empty");
                return Self::default();
            }
        };

        match raw {
            Some(json) => match HistoryStore::from_json(&json) {
                Ok(history) => Self { history },
                Err(err) => {
                    tracing::warn!(error = %err, "stored menu history is malformed, starting empty");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// True when `item` has no entry for `category` inside the repeat window.
    ///
    /// Entries are scanned in insertion order; the first in-window entry for
    /// the item disqualifies it.
    pub fn is_eligible(&self, category: &str, item: &str, now: DateTime<Utc>) -> bool {
        let cutoff = now - Duration::days(REPEAT_WINDOW_DAYS);
        !self
            .history
            .entries(category)
            .iter()
            .any(|e| e.item == item && e.timestamp > cutoff)
    }

    /// Record a pick at `now`, prune the category, and persist the whole
    /// history. A failed write keeps the in-memory state and logs a warning.
    pub fn record_selection<S: StateStore>(
        &mut self,
        store: &mut S,
        category: &str,
        item: &str,
        now: DateTime<Utc>,
    ) {
        self.history.push(
            category,
            HistoryEntry {
                item: item.to_string(),
                timestamp: now,
            },
        );
        self.history
            .prune(category, now - Duration::days(REPEAT_WINDOW_DAYS));
        self.persist(store);
    }

    /// Forget every entry for `category`. The exhaustion fallback: once all
    /// candidates are inside the repeat window, the cycle starts over.
    pub fn clear_category(&mut self, category: &str) {
        self.history.clear(category);
    }

    pub fn clear_all(&mut self) {
        self.history.clear_all();
    }

    pub fn entry_count(&self, category: &str) -> usize {
        self.history.entries(category).len()
    }

    fn persist<S: StateStore>(&self, store: &mut S) {
        let json = match self.history.to_json() {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize menu history");
                return;
            }
        };
        if let Err(err) = store.save(HISTORY_KEY, &json) {
            tracing::warn!(error = %err, "failed to persist menu history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn unknown_item_is_eligible() {
        let tracker = HistoryTracker::default();
        assert!(tracker.is_eligible("breakfast", "Poha", at(2024, 3, 10, 8)));
    }

    #[test]
    fn recent_entry_blocks_item_until_window_passes() {
        let mut store = MemoryStore::new();
        let mut tracker = HistoryTracker::default();
        let shown = at(2024, 3, 10, 8);

        tracker.record_selection(&mut store, "breakfast", "Poha", shown);

        assert!(!tracker.is_eligible("breakfast", "Poha", shown + Duration::days(3)));
        // The boundary itself is still inside the window.
        assert!(!tracker.is_eligible(
            "breakfast",
            "Poha",
            shown + Duration::days(REPEAT_WINDOW_DAYS) - Duration::seconds(1)
        ));
        assert!(tracker.is_eligible(
            "breakfast",
            "Poha",
            shown + Duration::days(REPEAT_WINDOW_DAYS)
        ));
    }

    #[test]
    fn categories_have_independent_history() {
        let mut store = MemoryStore::new();
        let mut tracker = HistoryTracker::default();
        let now = at(2024, 3, 10, 8);

        tracker.record_selection(&mut store, "lunch", "Sushi", now);

        assert!(!tracker.is_eligible("lunch", "Sushi", now));
        assert!(tracker.is_eligible("easy_lunch", "Sushi", now));
        assert!(tracker.is_eligible("dinner", "Sushi", now));
    }

    #[test]
    fn recording_prunes_entries_older_than_window() {
        let mut store = MemoryStore::new();
        let mut tracker = HistoryTracker::default();
        let old = at(2024, 3, 1, 8);

        tracker.record_selection(&mut store, "snack", "Orange", old);
        tracker.record_selection(&mut store, "snack", "Banana", old + Duration::days(10));

        assert_eq!(tracker.entry_count("snack"), 1);
        assert!(tracker.is_eligible("snack", "Orange", old + Duration::days(10)));
    }

    #[test]
    fn pruning_is_lazy_per_category() {
        let mut store = MemoryStore::new();
        let mut tracker = HistoryTracker::default();
        let old = at(2024, 3, 1, 8);

        tracker.record_selection(&mut store, "snack", "Orange", old);
        // Touching another category leaves the stale snack entry in place.
        tracker.record_selection(&mut store, "lunch", "Burger", old + Duration::days(10));

        assert_eq!(tracker.entry_count("snack"), 1);
    }

    #[test]
    fn roundtrips_through_the_store() {
        let mut store = MemoryStore::new();
        let mut tracker = HistoryTracker::default();
        let now = at(2024, 3, 10, 8);

        tracker.record_selection(&mut store, "dinner", "Tacos", now);

        let reloaded = HistoryTracker::load(&store);
        assert!(!reloaded.is_eligible("dinner", "Tacos", now));
        assert!(reloaded.is_eligible("dinner", "Chili", now));
    }

    #[test]
    fn malformed_persisted_history_starts_empty() {
        let store = MemoryStore::new().with_value(HISTORY_KEY, "{not json");
        let tracker = HistoryTracker::load(&store);
        assert!(tracker.is_eligible("breakfast", "Poha", at(2024, 3, 10, 8)));
    }
}
