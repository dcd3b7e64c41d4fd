//! MCP server module
//!
//! Exposes the cookbook as MCP tools over stdio.

pub mod server;

pub use server::CookbookService;
