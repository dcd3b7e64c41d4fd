//! Recipe expansion
//!
//! Walks a recipe's dependency graph, scaling quantities down each level,
//! and folds every reachable ingredient into one flat list plus a total
//! cook time.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{Entry, EntrySummary, Recipe, RequiredItem};
use crate::store::{Cookbook, EntryMap, StoreError};

/// Reasons a summary cannot be produced
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("No entry named '{0}'")]
    NotFound(String),

    #[error("'{0}' is an ingredient; only recipes can be summarized")]
    WrongType(String),

    #[error("Required item '{0}' is not in the cookbook")]
    MissingDependency(String),

    #[error("Recipe '{0}' depends on itself")]
    Cycle(String),

    #[error("Quantities for '{0}' overflow past the largest representable number")]
    Overflow(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Running totals threaded through one expansion
#[derive(Default)]
struct Accumulator<'a> {
    ingredients: Vec<RequiredItem>,
    positions: HashMap<&'a str, usize>,
    cook_time: f64,
}

impl<'a> Accumulator<'a> {
    fn add_ingredient(&mut self, name: &'a str, quantity: f64, cook_time: u64) {
        let position = match self.positions.get(name) {
            Some(&position) => position,
            None => {
                self.ingredients.push(RequiredItem {
                    name: name.to_string(),
                    quantity: 0.0,
                });
                self.positions.insert(name, self.ingredients.len() - 1);
                self.ingredients.len() - 1
            }
        };

        self.ingredients[position].quantity += quantity;
        self.cook_time += quantity * cook_time as f64;
    }

    fn is_finite(&self) -> bool {
        self.cook_time.is_finite() && self.ingredients.iter().all(|i| i.quantity.is_finite())
    }

    fn into_summary(self, name: &str) -> EntrySummary {
        EntrySummary {
            name: name.to_string(),
            cook_time: self.cook_time,
            ingredients: self.ingredients,
        }
    }
}

/// Summarize a recipe against the cookbook's current contents
pub fn summarize(cookbook: &Cookbook, name: &str) -> Result<EntrySummary, SummaryError> {
    cookbook.with_entries(|entries| summarize_entries(entries, name))
}

/// Summarize a recipe against a snapshot of entries.
///
/// Any missing dependency or cycle anywhere in the graph fails the whole
/// call; no partial summary is returned.
pub fn summarize_entries(entries: &EntryMap, name: &str) -> Result<EntrySummary, SummaryError> {
    let recipe = match entries.get(name) {
        None => return Err(SummaryError::NotFound(name.to_string())),
        Some(Entry::Ingredient(_)) => return Err(SummaryError::WrongType(name.to_string())),
        Some(Entry::Recipe(recipe)) => recipe,
    };

    let mut accumulator = Accumulator::default();
    expand(entries, recipe, &mut accumulator)?;

    if !accumulator.is_finite() {
        return Err(SummaryError::Overflow(name.to_string()));
    }

    Ok(accumulator.into_summary(name))
}

/// A recipe being expanded, with the position of its next required item
struct Frame<'a> {
    recipe: &'a Recipe,
    multiplier: f64,
    next: usize,
}

/// Depth-first expansion on an explicit stack, so nesting depth is bounded
/// by heap rather than thread stack.
///
/// `path` mirrors the recipes on `stack`. It is per-path rather than global
/// so shared sub-recipes (diamonds) stay legal.
fn expand<'a>(
    entries: &'a EntryMap,
    root: &'a Recipe,
    accumulator: &mut Accumulator<'a>,
) -> Result<(), SummaryError> {
    let mut stack = vec![Frame {
        recipe: root,
        multiplier: 1.0,
        next: 0,
    }];
    let mut path = HashSet::from([root.name.as_str()]);

    while let Some(frame) = stack.last_mut() {
        let parent = frame.recipe;
        let Some(item) = parent.required_items.get(frame.next) else {
            path.remove(parent.name.as_str());
            stack.pop();
            continue;
        };
        frame.next += 1;
        let quantity = item.quantity * frame.multiplier;

        match entries.get(item.name.as_str()) {
            None => return Err(SummaryError::MissingDependency(item.name.clone())),
            Some(Entry::Ingredient(ingredient)) => {
                accumulator.add_ingredient(&ingredient.name, quantity, ingredient.cook_time);
            }
            Some(Entry::Recipe(sub_recipe)) => {
                if !path.insert(sub_recipe.name.as_str()) {
                    return Err(SummaryError::Cycle(sub_recipe.name.clone()));
                }

                tracing::debug!(
                    parent = %parent.name,
                    recipe = %sub_recipe.name,
                    multiplier = quantity,
                    depth = stack.len(),
                    "Expanding sub-recipe"
                );
                stack.push(Frame {
                    recipe: sub_recipe,
                    multiplier: quantity,
                    next: 0,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn ingredient(name: &str, cook_time: i64) -> Value {
        json!({"type": "ingredient", "name": name, "cookTime": cook_time})
    }

    fn recipe(name: &str, items: &[(&str, f64)]) -> Value {
        let items: Vec<Value> = items
            .iter()
            .map(|(n, q)| json!({"name": n, "quantity": q}))
            .collect();
        json!({"type": "recipe", "name": name, "requiredItems": items})
    }

    /// Egg (5) and Omelette = 2 x Egg
    fn omelette_cookbook() -> Cookbook {
        let cookbook = Cookbook::new();
        cookbook.insert(&ingredient("Egg", 5)).unwrap();
        cookbook.insert(&recipe("Omelette", &[("Egg", 2.0)])).unwrap();
        cookbook
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_flat_recipe() {
        let summary = summarize(&omelette_cookbook(), "Omelette").unwrap();
        assert_eq!(summary.name, "Omelette");
        assert_close(summary.cook_time, 10.0);
        assert_eq!(
            summary.ingredients,
            vec![RequiredItem { name: "Egg".to_string(), quantity: 2.0 }]
        );
    }

    #[test]
    fn test_nested_recipe_multiplies() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("Brunch", &[("Omelette", 2.0)])).unwrap();

        let summary = summarize(&cookbook, "Brunch").unwrap();
        assert_eq!(summary.name, "Brunch");
        assert_close(summary.cook_time, 20.0);
        assert_eq!(summary.ingredients.len(), 1);
        assert_close(summary.quantity_of("Egg").unwrap(), 4.0);
    }

    #[test]
    fn test_diamond_accumulates() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("R", &[("Egg", 1.0), ("Omelette", 1.0)])).unwrap();

        let summary = summarize(&cookbook, "R").unwrap();
        assert_eq!(summary.ingredients.len(), 1);
        assert_close(summary.quantity_of("Egg").unwrap(), 3.0);
        assert_close(summary.cook_time, 15.0);
    }

    #[test]
    fn test_shared_sub_recipe_is_not_a_cycle() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("Left", &[("Omelette", 1.0)])).unwrap();
        cookbook.insert(&recipe("Right", &[("Omelette", 3.0)])).unwrap();
        cookbook.insert(&recipe("Feast", &[("Left", 1.0), ("Right", 1.0)])).unwrap();

        let summary = summarize(&cookbook, "Feast").unwrap();
        assert_close(summary.quantity_of("Egg").unwrap(), 8.0);
        assert_close(summary.cook_time, 40.0);
    }

    #[test]
    fn test_first_seen_order() {
        let cookbook = Cookbook::new();
        cookbook.insert(&ingredient("Egg", 5)).unwrap();
        cookbook.insert(&ingredient("Milk", 1)).unwrap();
        cookbook.insert(&ingredient("Flour", 0)).unwrap();
        cookbook.insert(&recipe("Batter", &[("Flour", 2.0), ("Egg", 1.0)])).unwrap();
        cookbook
            .insert(&recipe("Pancakes", &[("Milk", 1.0), ("Batter", 2.0), ("Egg", 1.0)]))
            .unwrap();

        let summary = summarize(&cookbook, "Pancakes").unwrap();
        let names: Vec<&str> = summary.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Flour", "Egg"]);
        assert_close(summary.quantity_of("Flour").unwrap(), 4.0);
        assert_close(summary.quantity_of("Egg").unwrap(), 3.0);
        // 1 milk x 1 + 4 flour x 0 + 3 egg x 5
        assert_close(summary.cook_time, 16.0);
    }

    #[test]
    fn test_sub_recipe_not_listed() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("Brunch", &[("Omelette", 1.0)])).unwrap();

        let summary = summarize(&cookbook, "Brunch").unwrap();
        assert!(summary.quantity_of("Omelette").is_none());
    }

    #[test]
    fn test_empty_recipe() {
        let cookbook = Cookbook::new();
        cookbook.insert(&recipe("Air", &[])).unwrap();

        let summary = summarize(&cookbook, "Air").unwrap();
        assert!(summary.ingredients.is_empty());
        assert_close(summary.cook_time, 0.0);
    }

    #[test]
    fn test_not_found() {
        let result = summarize(&omelette_cookbook(), "Toast");
        assert!(matches!(result, Err(SummaryError::NotFound(name)) if name == "Toast"));
    }

    #[test]
    fn test_ingredient_is_wrong_type() {
        let result = summarize(&omelette_cookbook(), "Egg");
        assert!(matches!(result, Err(SummaryError::WrongType(name)) if name == "Egg"));
    }

    #[test]
    fn test_missing_dependency_aborts() {
        let cookbook = omelette_cookbook();
        // Egg and Omelette resolve before the missing item is reached
        cookbook
            .insert(&recipe("Breakfast", &[("Egg", 1.0), ("Omelette", 1.0), ("Toast", 2.0)]))
            .unwrap();

        let result = summarize(&cookbook, "Breakfast");
        assert!(matches!(result, Err(SummaryError::MissingDependency(name)) if name == "Toast"));
    }

    #[test]
    fn test_missing_dependency_in_nested_recipe() {
        let cookbook = Cookbook::new();
        cookbook.insert(&recipe("Sandwich", &[("Bread", 2.0)])).unwrap();
        cookbook.insert(&recipe("Lunch", &[("Sandwich", 1.0)])).unwrap();

        let result = summarize(&cookbook, "Lunch");
        assert!(matches!(result, Err(SummaryError::MissingDependency(name)) if name == "Bread"));
    }

    #[test]
    fn test_self_cycle() {
        let cookbook = Cookbook::new();
        cookbook.insert(&recipe("Sourdough", &[("Sourdough", 1.0)])).unwrap();

        let result = summarize(&cookbook, "Sourdough");
        assert!(matches!(result, Err(SummaryError::Cycle(name)) if name == "Sourdough"));
    }

    #[test]
    fn test_mutual_cycle() {
        let cookbook = Cookbook::new();
        cookbook.insert(&ingredient("Water", 1)).unwrap();
        // Chicken references Egg before Egg exists; inserts are by name only
        cookbook.insert(&recipe("Chicken", &[("Water", 1.0), ("Egg", 1.0)])).unwrap();
        cookbook.insert(&recipe("Egg", &[("Chicken", 1.0)])).unwrap();
        cookbook.insert(&recipe("Farm", &[("Chicken", 2.0)])).unwrap();

        let result = summarize(&cookbook, "Farm");
        assert!(matches!(result, Err(SummaryError::Cycle(name)) if name == "Chicken"));
    }

    #[test]
    fn test_non_positive_quantities_propagate() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("Refund", &[("Omelette", -1.0)])).unwrap();
        cookbook.insert(&recipe("Nothing", &[("Egg", 0.0)])).unwrap();

        let refund = summarize(&cookbook, "Refund").unwrap();
        assert_close(refund.quantity_of("Egg").unwrap(), -2.0);
        assert_close(refund.cook_time, -10.0);

        let nothing = summarize(&cookbook, "Nothing").unwrap();
        assert_close(nothing.quantity_of("Egg").unwrap(), 0.0);
        assert_close(nothing.cook_time, 0.0);
    }

    #[test]
    fn test_fractional_quantities() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("Half", &[("Omelette", 0.5)])).unwrap();

        let summary = summarize(&cookbook, "Half").unwrap();
        assert_close(summary.quantity_of("Egg").unwrap(), 1.0);
        assert_close(summary.cook_time, 5.0);
    }

    #[test]
    fn test_idempotent() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("Brunch", &[("Omelette", 2.0), ("Egg", 1.0)])).unwrap();

        let first = summarize(&cookbook, "Brunch").unwrap();
        let second = summarize(&cookbook, "Brunch").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_wire_format() {
        let summary = summarize(&omelette_cookbook(), "Omelette").unwrap();
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"name": "Omelette", "cookTime": 10, "ingredients": [{"name": "Egg", "quantity": 2}]})
        );
    }

    #[test]
    fn test_deep_chain_on_small_stack() {
        const DEPTH: usize = 10_000;

        let cookbook = Cookbook::new();
        cookbook.insert(&ingredient("Egg", 5)).unwrap();
        cookbook.insert(&recipe("Level 0", &[("Egg", 1.0)])).unwrap();
        for level in 1..DEPTH {
            let below = format!("Level {}", level - 1);
            cookbook
                .insert(&recipe(&format!("Level {}", level), &[(below.as_str(), 1.0)]))
                .unwrap();
        }

        let top = format!("Level {}", DEPTH - 1);
        let summary = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || summarize(&cookbook, &top))
            .unwrap()
            .join()
            .unwrap()
            .unwrap();

        assert_eq!(summary.ingredients.len(), 1);
        assert_close(summary.quantity_of("Egg").unwrap(), 1.0);
        assert_close(summary.cook_time, 5.0);
    }

    #[test]
    fn test_overflowing_quantities_rejected() {
        let cookbook = Cookbook::new();
        cookbook.insert(&ingredient("Egg", 0)).unwrap();
        cookbook.insert(&recipe("Crate", &[("Egg", 1e200)])).unwrap();
        cookbook.insert(&recipe("Warehouse", &[("Crate", 1e200)])).unwrap();

        // One level is still representable
        assert!(summarize(&cookbook, "Crate").is_ok());

        let result = summarize(&cookbook, "Warehouse");
        assert!(matches!(result, Err(SummaryError::Overflow(name)) if name == "Warehouse"));
    }

    #[test]
    fn test_demo_seed() {
        let records = crate::config::parse_seed(include_str!("../../demos/brunch.json")).unwrap();
        let cookbook = Cookbook::new();
        let report = cookbook.insert_all(&records).unwrap();
        assert_eq!(report.inserted, 5);
        assert!(report.rejected.is_empty());

        let summary = summarize(&cookbook, "Brunch").unwrap();
        let names: Vec<&str> = summary.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Egg", "Milk", "Butter"]);
        assert_close(summary.quantity_of("Egg").unwrap(), 5.0);
        assert_close(summary.quantity_of("Milk").unwrap(), 2.0);
        assert_close(summary.quantity_of("Butter").unwrap(), 2.0);
        assert_close(summary.cook_time, 27.0);
    }

    #[test]
    fn test_concurrent_summaries() {
        let cookbook = omelette_cookbook();
        cookbook.insert(&recipe("Brunch", &[("Omelette", 2.0)])).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cookbook = cookbook.clone();
                std::thread::spawn(move || {
                    cookbook
                        .insert(&ingredient(&format!("Spice {}", i), 1))
                        .unwrap();
                    summarize(&cookbook, "Brunch").unwrap()
                })
            })
            .collect();

        for handle in handles {
            let summary = handle.join().unwrap();
            assert_close(summary.quantity_of("Egg").unwrap(), 4.0);
        }
        assert_eq!(cookbook.len().unwrap(), 7);
    }
}
