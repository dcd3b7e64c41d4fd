//! Summary Tool
//!
//! Computes the base ingredients and total cook time for a recipe.

use crate::models::EntrySummary;
use crate::store::Cookbook;
use crate::summary::{self, SummaryError};

/// Summarize a recipe by name.
///
/// Every failure kind is reported the same way to the caller; the kind is
/// only visible in the message and the log.
pub fn get_summary(cookbook: &Cookbook, name: &str) -> Result<EntrySummary, String> {
    summary::summarize(cookbook, name).map_err(|e| {
        match &e {
            SummaryError::Store(_) => tracing::error!(recipe = name, "Summary failed: {}", e),
            _ => tracing::warn!(recipe = name, "Summary failed: {}", e),
        }
        format!("Cannot summarize '{}': {}", name, e)
    })
}
