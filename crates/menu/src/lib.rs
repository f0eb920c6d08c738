pub mod clock;
pub mod error;
pub mod history;
pub mod planner;
pub mod selector;
pub mod snapshot;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::MenuError;
pub use history::{HISTORY_KEY, HistoryEntry, HistoryStore, HistoryTracker, REPEAT_WINDOW_DAYS};
pub use planner::{MenuPlanner, SlotView, TodayMenu};
pub use selector::{LOW_INVENTORY_THRESHOLD, MenuSelector, Selection};
pub use snapshot::{DailySnapshot, SNAPSHOT_KEY};
pub use store::{MemoryStore, StateStore, StoreError};
pub use types::{MealSlot, MenuCatalog, SourceKey};
