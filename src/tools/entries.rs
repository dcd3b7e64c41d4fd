//! Entry Tools
//!
//! Tools for adding, fetching, and listing cookbook entries.

use serde::Serialize;
use serde_json::Value;

use crate::models::{Entry, EntryKind};
use crate::store::{Cookbook, StoreError};

/// Response for add_entry
#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub success: bool,
}

/// Response for list_entries
#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub entries: Vec<Entry>,
    pub count: usize,
}

/// Validate and store a raw entry record
pub fn add_entry(cookbook: &Cookbook, candidate: &Value) -> Result<AddEntryResponse, String> {
    match cookbook.insert(candidate) {
        Ok(_) => Ok(AddEntryResponse { success: true }),
        Err(StoreError::Validation(e)) => {
            tracing::warn!("Rejected entry: {}", e);
            Err(format!("Entry rejected: {}", e))
        }
        Err(e) => Err(format!("Store error: {}", e)),
    }
}

/// Get a single entry by exact name
pub fn get_entry(cookbook: &Cookbook, name: &str) -> Result<Option<Entry>, String> {
    cookbook
        .lookup(name)
        .map_err(|e| format!("Store error: {}", e))
}

/// List entries sorted by name, optionally filtered by type
pub fn list_entries(cookbook: &Cookbook, kind: Option<&str>) -> Result<ListEntriesResponse, String> {
    let kind = match kind {
        Some(tag) => Some(
            EntryKind::from_str(tag)
                .ok_or_else(|| format!("Unknown entry type '{}' (expected 'ingredient' or 'recipe')", tag))?,
        ),
        None => None,
    };

    let entries = cookbook
        .list(kind)
        .map_err(|e| format!("Store error: {}", e))?;

    Ok(ListEntriesResponse {
        count: entries.len(),
        entries,
    })
}
