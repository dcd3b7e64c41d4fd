//! Cookbook Tools module
//!
//! MCP tool implementations for the Cookbook service.

pub mod entries;
pub mod handwriting;
pub mod status;
pub mod summaries;
