//! Data models
//!
//! Rust types for cookbook entries and recipe summaries.

mod entry;
mod number;
mod summary;

pub use entry::{Entry, EntryHeader, EntryKind, Ingredient, Recipe, RequiredItem, ValidationError};
pub use summary::EntrySummary;
