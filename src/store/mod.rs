//! Store module
//!
//! The in-memory registry of cookbook entries.

pub mod cookbook;

pub use cookbook::{
    Cookbook, EntryCounts, EntryMap, LoadReport, RejectedRecord, StoreError, StoreResult,
};
