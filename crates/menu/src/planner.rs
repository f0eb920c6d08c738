use crate::clock::Clock;
use crate::error::MenuError;
use crate::history::{HISTORY_KEY, HistoryTracker};
use crate::selector::{LOW_INVENTORY_THRESHOLD, MenuSelector};
use crate::snapshot::{DATE_KEY_FORMAT, DailySnapshot, SNAPSHOT_KEY};
use crate::store::StateStore;
use crate::types::{MealSlot, MenuCatalog, SourceKey};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::VariantArray;

/// Read-only projection of one slot for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub slot: MealSlot,
    /// `None` when the slot's candidate list is empty.
    pub item: Option<String>,
    pub easy_used: bool,
    pub revealed: bool,
    /// Candidate count of the list the slot currently draws from, present
    /// when that list is non-empty but below the warning threshold.
    pub low_inventory: Option<usize>,
}

/// Read-only projection of the whole day for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayMenu {
    pub date: NaiveDate,
    /// All five slots in display order, hidden ones included.
    pub slots: Vec<SlotView>,
}

impl TodayMenu {
    pub fn slot(&self, want: MealSlot) -> Option<&SlotView> {
        self.slots.iter().find(|view| view.slot == want)
    }

    /// Slots the view should render right now.
    pub fn visible(&self) -> impl Iterator<Item = &SlotView> {
        self.slots.iter().filter(|view| view.revealed)
    }
}

/// Owns the day's menu: picks items through the repeat-avoiding selector,
/// keeps the per-day snapshot, and persists both through the injected store.
///
/// Repeated calls on the same calendar day return the same menu; the first
/// call after local midnight rolls everything over.
pub struct MenuPlanner<S: StateStore, C: Clock> {
    catalog: MenuCatalog,
    tracker: HistoryTracker,
    snapshot: DailySnapshot,
    store: S,
    clock: C,
    rng: StdRng,
}

impl<S: StateStore, C: Clock> MenuPlanner<S, C> {
    /// Load persisted state from `store` and build a planner over `catalog`.
    ///
    /// `seed` pins the selection order for tests; `None` seeds from the OS.
    pub fn new(catalog: MenuCatalog, store: S, clock: C, seed: Option<u64>) -> Self {
        let tracker = HistoryTracker::load(&store);
        let snapshot = load_snapshot(&store);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        MenuPlanner {
            catalog,
            tracker,
            snapshot,
            store,
            clock,
            rng,
        }
    }

    /// Make sure a snapshot for today exists with every mandatory slot
    /// filled, then return the day's menu.
    ///
    /// Slots already filled today are reused as-is, so calling this any
    /// number of times within a day yields the same menu.
    pub fn ensure_today(&mut self) -> TodayMenu {
        let today = self.clock.today();
        let mut changed = false;

        if !self.snapshot.is_for(today) {
            tracing::info!(date = %today, "starting a fresh menu for the day");
            self.snapshot = DailySnapshot::for_date(today);
            changed = true;
        }

        for slot in MealSlot::MANDATORY {
            if self.snapshot.item(slot).is_none() {
                changed |= self.fill_slot(slot, slot.source());
            }
        }

        if changed {
            self.persist_snapshot();
        }

        self.today_view()
    }

    /// Fill or override one slot from the given source list.
    ///
    /// `source` must be the slot's own list (optional-slot reveal) or its
    /// easy variant (override). Both are one-shot per day: once the matching
    /// flag is set, later calls return the stored item without re-rolling.
    pub fn request_slot(
        &mut self,
        slot: MealSlot,
        source: SourceKey,
    ) -> Result<SlotView, MenuError> {
        self.ensure_today();

        if source == slot.source() {
            if !self.snapshot.is_revealed(slot) {
                self.fill_slot(slot, source);
                self.snapshot.mark_revealed(slot);
                self.persist_snapshot();
            }
            return Ok(self.slot_view(slot));
        }

        if slot.easy_source() == Some(source) {
            if !self.snapshot.easy_used(slot) {
                self.fill_slot(slot, source);
                self.snapshot.mark_easy_used(slot);
                self.persist_snapshot();
            }
            return Ok(self.slot_view(slot));
        }

        Err(MenuError::SourceMismatch {
            slot,
            requested: source,
        })
    }

    /// Reveal an optional slot. A mandatory slot is always revealed, so this
    /// just returns its view.
    pub fn reveal(&mut self, slot: MealSlot) -> Result<SlotView, MenuError> {
        self.request_slot(slot, slot.source())
    }

    /// Swap a slot to its easy variant for the rest of the day.
    pub fn use_easy(&mut self, slot: MealSlot) -> Result<SlotView, MenuError> {
        let source = slot.easy_source().ok_or(MenuError::NoEasyVariant(slot))?;
        self.request_slot(slot, source)
    }

    /// The current day's menu without touching any state.
    pub fn today_view(&self) -> TodayMenu {
        let date = NaiveDate::parse_from_str(&self.snapshot.date, DATE_KEY_FORMAT)
            .unwrap_or_else(|_| self.clock.today());

        TodayMenu {
            date,
            slots: MealSlot::VARIANTS
                .iter()
                .map(|&slot| self.slot_view(slot))
                .collect(),
        }
    }

    /// Drop all persisted menu state: history and the day's snapshot.
    pub fn reset(&mut self) {
        self.tracker.clear_all();
        self.snapshot = DailySnapshot::default();
        for key in [HISTORY_KEY, SNAPSHOT_KEY] {
            if let Err(err) = self.store.remove(key) {
                tracing::warn!(key, error = %err, "failed to remove persisted menu state");
            }
        }
    }

    /// Run a selection for `slot` from `source` and store the outcome.
    /// Returns whether the snapshot changed.
    fn fill_slot(&mut self, slot: MealSlot, source: SourceKey) -> bool {
        let key: &str = source.as_ref();
        let selection = MenuSelector::select(
            &mut self.tracker,
            &mut self.store,
            key,
            self.catalog.candidates(key),
            self.clock.now(),
            &mut self.rng,
        );

        let before = self.snapshot.item(slot).map(str::to_string);
        self.snapshot.set_item(slot, selection.map(|s| s.item));
        self.snapshot.item(slot) != before.as_deref()
    }

    fn slot_view(&self, slot: MealSlot) -> SlotView {
        let easy_used = self.snapshot.easy_used(slot);
        let source = if easy_used {
            slot.easy_source().unwrap_or(slot.source())
        } else {
            slot.source()
        };
        let count = self.catalog.len(source.as_ref());

        SlotView {
            slot,
            item: self.snapshot.item(slot).map(str::to_string),
            easy_used,
            revealed: self.snapshot.is_revealed(slot),
            low_inventory: (count > 0 && count < LOW_INVENTORY_THRESHOLD).then_some(count),
        }
    }

    fn persist_snapshot(&mut self) {
        let json = match self.snapshot.to_json() {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize daily snapshot");
                return;
            }
        };
        if let Err(err) = self.store.save(SNAPSHOT_KEY, &json) {
            tracing::warn!(error = %err, "failed to persist daily snapshot");
        }
    }
}

fn load_snapshot<S: StateStore>(store: &S) -> DailySnapshot {
    let raw = match store.load(SNAPSHOT_KEY) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read daily snapshot, starting fresh");
            return DailySnapshot::default();
        }
    };

    match raw {
        Some(json) => match DailySnapshot::from_json(&json) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, "stored daily snapshot is malformed, starting fresh");
                DailySnapshot::default()
            }
        },
        None => DailySnapshot::default(),
    }
}
