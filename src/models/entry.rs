//! Cookbook entry model
//!
//! Ingredients and recipes, and the parse-and-validate step that turns an
//! untyped JSON record into one of them.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a candidate record is rejected at insert time
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Entry must be a JSON object")]
    NotAnObject,

    #[error("Entry name is missing or not a string")]
    MissingName,

    #[error("Entry type is missing or not a string")]
    MissingType,

    #[error("Unknown entry type '{0}' (expected 'ingredient' or 'recipe')")]
    UnknownType(String),

    #[error("An entry named '{0}' already exists")]
    DuplicateName(String),

    #[error("cookTime must be a non-negative integer")]
    InvalidCookTime,

    #[error("requiredItems is missing or not an array")]
    MissingRequiredItems,

    #[error("requiredItems[{0}] must be an object with a string name and a numeric quantity")]
    MalformedRequiredItem(usize),

    #[error("requiredItems lists '{0}' more than once")]
    DuplicateRequiredItem(String),
}

/// Discriminant of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Ingredient,
    Recipe,
}

impl EntryKind {
    /// Parse from the wire tag
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ingredient" => Some(EntryKind::Ingredient),
            "recipe" => Some(EntryKind::Recipe),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Ingredient => "ingredient",
            EntryKind::Recipe => "recipe",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named dependency of a recipe, with units needed per unit of the recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub name: String,
    #[serde(serialize_with = "super::number::serialize_compact")]
    pub quantity: f64,
}

/// Atomic entry with a fixed per-unit cook time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub cook_time: u64,
}

/// Composite entry built from other entries by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub required_items: Vec<RequiredItem>,
}

/// A validated cookbook entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::Ingredient(i) => &i.name,
            Entry::Recipe(r) => &r.name,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Ingredient(_) => EntryKind::Ingredient,
            Entry::Recipe(_) => EntryKind::Recipe,
        }
    }

    /// Validate a raw record without checking name uniqueness
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let header = EntryHeader::parse(value)?;
        header.into_entry(value)
    }
}

/// The name and type tag of a candidate, checked before anything else
#[derive(Debug, Clone, PartialEq)]
pub struct EntryHeader<'a> {
    pub name: &'a str,
    pub kind: EntryKind,
}

impl<'a> EntryHeader<'a> {
    /// Check that `name` and `type` are present strings and the type is known
    pub fn parse(value: &'a Value) -> Result<Self, ValidationError> {
        let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingName)?;
        let tag = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingType)?;
        let kind =
            EntryKind::from_str(tag).ok_or_else(|| ValidationError::UnknownType(tag.to_string()))?;

        Ok(Self { name, kind })
    }

    /// Validate the type-specific fields and build the entry
    pub fn into_entry(self, value: &Value) -> Result<Entry, ValidationError> {
        let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;
        let name = self.name.to_string();

        match self.kind {
            EntryKind::Ingredient => Ok(Entry::Ingredient(Ingredient {
                name,
                cook_time: parse_cook_time(obj)?,
            })),
            EntryKind::Recipe => Ok(Entry::Recipe(Recipe {
                name,
                required_items: parse_required_items(obj)?,
            })),
        }
    }
}

fn parse_cook_time(obj: &Map<String, Value>) -> Result<u64, ValidationError> {
    let number = match obj.get("cookTime") {
        Some(Value::Number(n)) => n,
        _ => return Err(ValidationError::InvalidCookTime),
    };

    if let Some(n) = number.as_u64() {
        return Ok(n);
    }

    // 5.0 is accepted as 5; negatives and fractions are not
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        _ => Err(ValidationError::InvalidCookTime),
    }
}

fn parse_required_items(obj: &Map<String, Value>) -> Result<Vec<RequiredItem>, ValidationError> {
    let items = obj
        .get("requiredItems")
        .and_then(Value::as_array)
        .ok_or(ValidationError::MissingRequiredItems)?;

    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let name = item.get("name").and_then(Value::as_str);
        let quantity = item.get("quantity").and_then(Value::as_f64);

        let (name, quantity) = match (name, quantity) {
            (Some(name), Some(quantity)) if quantity.is_finite() => (name, quantity),
            _ => return Err(ValidationError::MalformedRequiredItem(index)),
        };

        if !seen.insert(name) {
            return Err(ValidationError::DuplicateRequiredItem(name.to_string()));
        }

        parsed.push(RequiredItem {
            name: name.to_string(),
            quantity,
        });
    }

    Ok(parsed)
}
