use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// One meal slot on the daily menu.
///
/// Breakfast, lunch and dinner are filled as soon as a day starts; snack and
/// dessert stay hidden until the user asks for them.
#[derive(
    EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

impl MealSlot {
    /// Slots populated immediately when a new day starts.
    pub const MANDATORY: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn is_mandatory(self) -> bool {
        Self::MANDATORY.contains(&self)
    }

    /// The candidate list this slot draws from by default.
    pub fn source(self) -> SourceKey {
        match self {
            MealSlot::Breakfast => SourceKey::Breakfast,
            MealSlot::Lunch => SourceKey::Lunch,
            MealSlot::Dinner => SourceKey::Dinner,
            MealSlot::Snack => SourceKey::Snack,
            MealSlot::Dessert => SourceKey::Dessert,
        }
    }

    /// The low-effort alternative list, where one exists.
    pub fn easy_source(self) -> Option<SourceKey> {
        match self {
            MealSlot::Breakfast => Some(SourceKey::EasyBreakfast),
            MealSlot::Lunch => Some(SourceKey::EasyLunch),
            MealSlot::Dinner => Some(SourceKey::EasyDinner),
            MealSlot::Snack | MealSlot::Dessert => None,
        }
    }

    /// Human-readable slot name for display.
    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
            MealSlot::Dessert => "Dessert",
        }
    }
}

/// Canonical category keys for the built-in candidate lists.
///
/// Each key owns an independent selection history, so the easy variants never
/// share a repeat window with their main list even when item names overlap.
#[derive(
    EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "snake_case")]
pub enum SourceKey {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
    EasyBreakfast,
    EasyLunch,
    EasyDinner,
}

/// Candidate lists keyed by category.
///
/// The catalog is a plain string-keyed map so configuration may carry lists
/// beyond the canonical [`SourceKey`] set. A missing key behaves exactly like
/// an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuCatalog {
    lists: HashMap<String, Vec<String>>,
}

impl MenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate list for a category.
    pub fn insert(&mut self, category: impl Into<String>, items: Vec<String>) {
        self.lists.insert(category.into(), items);
    }

    /// Candidates for a category; empty when the category is not configured.
    pub fn candidates(&self, category: &str) -> &[String] {
        self.lists.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, category: &str) -> usize {
        self.candidates(category).len()
    }

    pub fn is_empty(&self, category: &str) -> bool {
        self.candidates(category).is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for MenuCatalog {
    fn from(lists: HashMap<String, Vec<String>>) -> Self {
        Self { lists }
    }
}
