//! Cookbook MCP Server Implementation
//!
//! Implements the MCP server with all Cookbook tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::store::Cookbook;
use crate::tools::entries;
use crate::tools::handwriting;
use crate::tools::status::StatusTracker;
use crate::tools::summaries;

/// Cookbook MCP Service
#[derive(Clone)]
pub struct CookbookService {
    cookbook: Cookbook,
    status_tracker: Arc<StatusTracker>,
    tool_router: ToolRouter<CookbookService>,
}

impl CookbookService {
    pub fn new(cookbook: Cookbook) -> Self {
        Self {
            cookbook,
            status_tracker: Arc::new(StatusTracker::new()),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseHandwritingParams {
    /// Free-form recipe name to clean up
    pub input: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddEntryParams {
    /// Entry record: {"type": "ingredient", "name", "cookTime"} or
    /// {"type": "recipe", "name", "requiredItems": [{"name", "quantity"}]}
    pub entry: serde_json::Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSummaryParams {
    /// Exact name of the recipe to summarize
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetEntryParams {
    /// Exact entry name
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListEntriesParams {
    /// Filter by type: ingredient or recipe (optional)
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CookbookService {
    // --- Status ---

    #[tool(description = "Get the current status of the Cookbook service including build info, entry counts, and process information")]
    fn cookbook_status(&self) -> Result<CallToolResult, McpError> {
        let status = self
            .status_tracker
            .get_status(&self.cookbook)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for adding ingredients and recipes and reading summaries. Call this when unsure how to use the cookbook tools.")]
    fn cookbook_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::COOKBOOK_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(COOKBOOK_INSTRUCTIONS)]))
    }

    // --- Names ---

    #[tool(description = "Normalize a handwritten recipe name: hyphens/underscores become spaces, non-letters are dropped, words are title-cased")]
    fn parse_handwriting(&self, Parameters(p): Parameters<ParseHandwritingParams>) -> Result<CallToolResult, McpError> {
        let result = handwriting::parse_handwriting(&p.input).map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Entries ---

    #[tool(description = "Add an ingredient or recipe. Names are unique across all entries and cannot be changed later.")]
    fn add_entry(&self, Parameters(p): Parameters<AddEntryParams>) -> Result<CallToolResult, McpError> {
        let result = entries::add_entry(&self.cookbook, &p.entry).map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get a single entry by exact name")]
    fn get_entry(&self, Parameters(p): Parameters<GetEntryParams>) -> Result<CallToolResult, McpError> {
        let result = entries::get_entry(&self.cookbook, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(entry) => serde_json::to_string_pretty(&entry),
            None => Ok(serde_json::json!({"error": "Entry not found", "name": p.name}).to_string()),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List entries sorted by name, optionally filtered by type")]
    fn list_entries(&self, Parameters(p): Parameters<ListEntriesParams>) -> Result<CallToolResult, McpError> {
        let result = entries::list_entries(&self.cookbook, p.kind.as_deref()).map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Summaries ---

    #[tool(description = "Summarize a recipe: total cook time and the base ingredients needed for one unit, expanding nested recipes")]
    fn get_summary(&self, Parameters(p): Parameters<GetSummaryParams>) -> Result<CallToolResult, McpError> {
        let result = summaries::get_summary(&self.cookbook, &p.name).map_err(|e| McpError::invalid_params(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CookbookService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cookbook".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Cookbook".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Cookbook - ingredients, recipes, and recipe summaries. \
                 Call cookbook_instructions first if unsure of the entry format. \
                 Entries: add_entry/get_entry/list_entries (create-once, names unique). \
                 Summaries: get_summary expands a recipe to base ingredients and total cook time. \
                 Names: parse_handwriting cleans up a scrawled name. \
                 Status: cookbook_status."
                    .into(),
            ),
        }
    }
}
