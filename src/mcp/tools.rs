//! MCP tool listing and invocation

use crate::error::ProviderError;
use crate::provider::{tool_descriptors, BinanceProvider};
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use std::sync::Arc;

/// Lists all available tools with their input schemas
pub fn list_tools() -> Vec<Tool> {
    tool_descriptors()
        .into_iter()
        .map(|tool| Tool::new(tool.name, tool.description, Arc::new(tool.input_schema)))
        .collect()
}

/// Calls a tool and renders the outcome as tool content
///
/// Failures become an `is_error` result carrying the JSON error envelope, so
/// the client sees the message instead of a protocol error.
pub async fn call_tool(
    provider: &BinanceProvider,
    name: &str,
    arguments: Option<JsonObject>,
) -> CallToolResult {
    match provider.call_tool(name, arguments.unwrap_or_default()).await {
        Ok(value) => CallToolResult::success(vec![Content::text(value.to_string())]),
        Err(err) => CallToolResult::error(vec![Content::text(error_text(&err))]),
    }
}

fn error_text(err: &ProviderError) -> String {
    serde_json::to_string(&err.envelope()).unwrap_or_else(|_| err.to_string())
}
