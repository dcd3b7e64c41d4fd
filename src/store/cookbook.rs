//! In-memory cookbook store
//!
//! Holds validated entries keyed by name behind a read/write lock. Inserts
//! take the write lock; lookups and summaries share the read lock.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Entry, EntryHeader, EntryKind, ValidationError};

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid entry: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cookbook lock poisoned")]
    Poisoned,
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Entries keyed by name
pub type EntryMap = HashMap<String, Entry>;

/// Number of entries of each kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryCounts {
    pub ingredients: usize,
    pub recipes: usize,
}

/// A record that was skipped while bulk loading
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    pub index: usize,
    pub name: Option<String>,
    pub reason: String,
}

/// Outcome of inserting many records in order
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub inserted: usize,
    pub rejected: Vec<RejectedRecord>,
}

/// Shared handle to the cookbook
#[derive(Clone, Default)]
pub struct Cookbook {
    entries: Arc<RwLock<EntryMap>>,
}

impl Cookbook {
    /// Create an empty cookbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw record and store it under its name.
    ///
    /// Checks run in order and stop at the first failure: name and type,
    /// uniqueness, then the type-specific fields. Nothing is stored on
    /// failure.
    pub fn insert(&self, candidate: &Value) -> StoreResult<EntryKind> {
        let header = EntryHeader::parse(candidate)?;

        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;

        if entries.contains_key(header.name) {
            return Err(ValidationError::DuplicateName(header.name.to_string()).into());
        }

        let entry = header.into_entry(candidate)?;
        let kind = entry.kind();

        tracing::info!(name = entry.name(), kind = %kind, "Entry added");
        entries.insert(entry.name().to_string(), entry);

        Ok(kind)
    }

    /// Insert records in order, skipping (and reporting) rejected ones
    pub fn insert_all(&self, records: &[Value]) -> StoreResult<LoadReport> {
        let mut report = LoadReport::default();

        for (index, record) in records.iter().enumerate() {
            match self.insert(record) {
                Ok(_) => report.inserted += 1,
                Err(StoreError::Validation(e)) => {
                    let name = record.get("name").and_then(Value::as_str).map(str::to_string);
                    tracing::warn!(index, name = ?name, "Skipping record: {}", e);
                    report.rejected.push(RejectedRecord {
                        index,
                        name,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    /// Look up an entry by name
    pub fn lookup(&self, name: &str) -> StoreResult<Option<Entry>> {
        self.with_entries(|entries| Ok(entries.get(name).cloned()))
    }

    /// Run a closure against a consistent snapshot of the entries.
    ///
    /// The read lock is held for the whole closure, so no insert lands
    /// while it runs.
    pub fn with_entries<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&EntryMap) -> Result<T, E>,
        E: From<StoreError>,
    {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        f(&entries)
    }

    pub fn len(&self) -> StoreResult<usize> {
        self.with_entries(|entries| Ok(entries.len()))
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// All entries sorted by name, optionally restricted to one kind
    pub fn list(&self, kind: Option<EntryKind>) -> StoreResult<Vec<Entry>> {
        self.with_entries(|entries| {
            let mut listed: Vec<Entry> = entries
                .values()
                .filter(|e| kind.map_or(true, |k| e.kind() == k))
                .cloned()
                .collect();
            listed.sort_by(|a, b| a.name().cmp(b.name()));
            Ok(listed)
        })
    }

    pub fn counts(&self) -> StoreResult<EntryCounts> {
        self.with_entries(|entries| {
            let mut counts = EntryCounts::default();
            for entry in entries.values() {
                match entry.kind() {
                    EntryKind::Ingredient => counts.ingredients += 1,
                    EntryKind::Recipe => counts.recipes += 1,
                }
            }
            Ok(counts)
        })
    }
}
