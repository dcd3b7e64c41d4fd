//! Cookbook Library
//!
//! Ingredient and recipe entries, and recipe summaries that expand nested
//! recipes down to base ingredients and total cook time.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod store;
pub mod summary;
pub mod tools;
