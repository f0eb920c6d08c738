use crate::types::{MealSlot, SourceKey};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    #[error("the {requested} list cannot fill the {slot} slot")]
    SourceMismatch {
        slot: MealSlot,
        requested: SourceKey,
    },

    #[error("the {0} slot has no easy variant")]
    NoEasyVariant(MealSlot),
}
