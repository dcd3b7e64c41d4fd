//! Summary module
//!
//! Expands recipes into base ingredients and total cook time.

pub mod engine;

pub use engine::{summarize, summarize_entries, SummaryError};
