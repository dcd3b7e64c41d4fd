//! Recipe summary model
//!
//! The flattened result of expanding a recipe down to its base ingredients.

use serde::{Deserialize, Serialize};

use super::RequiredItem;

/// Total cook time and base ingredients for one unit of a recipe.
///
/// `ingredients` is listed in the order each ingredient was first reached
/// while expanding. Callers should not rely on that order being stable
/// across releases.
///
/// Whole numbers go out as JSON integers (`10`, not `10.0`). Every value is
/// finite; a summary whose totals would overflow is an error instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub name: String,
    #[serde(serialize_with = "super::number::serialize_compact")]
    pub cook_time: f64,
    pub ingredients: Vec<RequiredItem>,
}

impl EntrySummary {
    /// Accumulated quantity of an ingredient, if it appears
    pub fn quantity_of(&self, ingredient: &str) -> Option<f64> {
        self.ingredients
            .iter()
            .find(|item| item.name == ingredient)
            .map(|item| item.quantity)
    }
}
