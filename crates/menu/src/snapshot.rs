use crate::types::MealSlot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar-day key format, e.g. `2024-03-10`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Storage key for the persisted snapshot blob.
pub const SNAPSHOT_KEY: &str = "menu_of_the_day";

/// One calendar day's menu: the chosen item per slot plus the flags the view
/// needs to know which slots are visible and which ran through their easy
/// variant.
///
/// Flags only move from `false` to `true` within a day; the whole record is
/// superseded when the date changes. Every flag deserializes with a default
/// so snapshots written by older builds load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: String,
    #[serde(default)]
    pub breakfast: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
    #[serde(default)]
    pub snack: Option<String>,
    #[serde(default)]
    pub dessert: Option<String>,
    #[serde(default)]
    pub easy_breakfast_used: bool,
    #[serde(default)]
    pub easy_lunch_used: bool,
    #[serde(default)]
    pub easy_dinner_used: bool,
    #[serde(default)]
    pub snack_revealed: bool,
    #[serde(default)]
    pub dessert_revealed: bool,
}

impl DailySnapshot {
    /// A fresh snapshot for `date`: no items, all flags off.
    pub fn for_date(date: NaiveDate) -> Self {
        DailySnapshot {
            date: date.format(DATE_KEY_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date.format(DATE_KEY_FORMAT).to_string()
    }

    pub fn item(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_deref(),
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
            MealSlot::Snack => self.snack.as_deref(),
            MealSlot::Dessert => self.dessert.as_deref(),
        }
    }

    pub fn set_item(&mut self, slot: MealSlot, item: Option<String>) {
        match slot {
            MealSlot::Breakfast => self.breakfast = item,
            MealSlot::Lunch => self.lunch = item,
            MealSlot::Dinner => self.dinner = item,
            MealSlot::Snack => self.snack = item,
            MealSlot::Dessert => self.dessert = item,
        }
    }

    pub fn easy_used(&self, slot: MealSlot) -> bool {
        match slot {
            MealSlot::Breakfast => self.easy_breakfast_used,
            MealSlot::Lunch => self.easy_lunch_used,
            MealSlot::Dinner => self.easy_dinner_used,
            MealSlot::Snack | MealSlot::Dessert => false,
        }
    }

    pub fn mark_easy_used(&mut self, slot: MealSlot) {
        match slot {
            MealSlot::Breakfast => self.easy_breakfast_used = true,
            MealSlot::Lunch => self.easy_lunch_used = true,
            MealSlot::Dinner => self.easy_dinner_used = true,
            MealSlot::Snack | MealSlot::Dessert => {}
        }
    }

    /// Whether the slot is visible. Mandatory slots always are; snack and
    /// dessert appear once revealed.
    pub fn is_revealed(&self, slot: MealSlot) -> bool {
        match slot {
            MealSlot::Snack => self.snack_revealed,
            MealSlot::Dessert => self.dessert_revealed,
            _ => true,
        }
    }

    pub fn mark_revealed(&mut self, slot: MealSlot) {
        match slot {
            MealSlot::Snack => self.snack_revealed = true,
            MealSlot::Dessert => self.dessert_revealed = true,
            _ => {}
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn fresh_snapshot_has_no_items_and_no_flags() {
        let snapshot = DailySnapshot::for_date(date());

        assert_eq!(snapshot.date, "2024-03-10");
        assert!(snapshot.is_for(date()));
        for slot in [
            MealSlot::Breakfast,
            MealSlot::Lunch,
            MealSlot::Dinner,
            MealSlot::Snack,
            MealSlot::Dessert,
        ] {
            assert_eq!(snapshot.item(slot), None);
            assert!(!snapshot.easy_used(slot));
        }
        assert!(!snapshot.is_revealed(MealSlot::Snack));
        assert!(!snapshot.is_revealed(MealSlot::Dessert));
        assert!(snapshot.is_revealed(MealSlot::Breakfast));
    }

    #[test]
    fn json_roundtrip_preserves_items_and_flags() {
        let mut snapshot = DailySnapshot::for_date(date());
        snapshot.set_item(MealSlot::Lunch, Some("Sushi".to_string()));
        snapshot.mark_easy_used(MealSlot::Lunch);
        snapshot.mark_revealed(MealSlot::Snack);

        let restored = DailySnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn missing_flag_fields_merge_as_defaults() {
        // A snapshot written before the easy/reveal flags existed.
        let json = r#"{"date":"2024-03-10","breakfast":"Poha","lunch":"Sushi","dinner":"Tacos"}"#;

        let snapshot = DailySnapshot::from_json(json).unwrap();

        assert_eq!(snapshot.item(MealSlot::Breakfast), Some("Poha"));
        assert!(!snapshot.easy_used(MealSlot::Breakfast));
        assert!(!snapshot.is_revealed(MealSlot::Snack));
        assert_eq!(snapshot.item(MealSlot::Snack), None);
    }

    #[test]
    fn easy_flags_only_apply_to_mandatory_slots() {
        let mut snapshot = DailySnapshot::for_date(date());
        snapshot.mark_easy_used(MealSlot::Snack);
        assert!(!snapshot.easy_used(MealSlot::Snack));
    }
}
