use crate::history::HistoryTracker;
use crate::store::StateStore;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Lists shorter than this trigger a low-inventory warning.
pub const LOW_INVENTORY_THRESHOLD: usize = 7;

/// Outcome of a single category selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub item: String,
    /// Candidate count, present when the list is below the warning threshold.
    pub low_inventory: Option<usize>,
    /// True when every candidate was inside the repeat window and the
    /// category history was cleared before picking.
    pub history_reset: bool,
}

/// Picks one item per request, steering away from anything shown recently.
pub struct MenuSelector;

impl MenuSelector {
    /// Choose uniformly among the candidates still eligible for `category`.
    ///
    /// When every candidate has been shown inside the repeat window, the
    /// category history is cleared and the pick falls back to the full list,
    /// so a non-empty list always yields an item. An empty list yields
    /// `None` and leaves history untouched.
    pub fn select<S, R>(
        tracker: &mut HistoryTracker,
        store: &mut S,
        category: &str,
        candidates: &[String],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<Selection>
    where
        S: StateStore,
        R: Rng + ?Sized,
    {
        if candidates.is_empty() {
            return None;
        }

        let eligible: Vec<&String> = candidates
            .iter()
            .filter(|item| tracker.is_eligible(category, item, now))
            .collect();

        let (item, history_reset) = match eligible.choose(rng) {
            Some(item) => ((*item).clone(), false),
            None => {
                tracing::warn!(
                    category,
                    "all candidates shown within the last week, resetting history"
                );
                tracker.clear_category(category);
                (candidates.choose(rng)?.clone(), true)
            }
        };

        tracker.record_selection(store, category, &item, now);

        let low_inventory =
            (candidates.len() < LOW_INVENTORY_THRESHOLD).then_some(candidates.len());

        Some(Selection {
            item,
            low_inventory,
            history_reset,
        })
    }
}
