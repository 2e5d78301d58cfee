//! MCP ServerHandler Implementation
//!
//! Lists and calls tools, lists and reads resources, all through the
//! provider's dispatch tables.

use crate::mcp::server::BinanceServer;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorData, Implementation, InitializeResult,
    ListResourcesResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ReadResourceRequestParam, ReadResourceResult, ResourcesCapability, ServerCapabilities,
    ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};

impl ServerHandler for BinanceServer {
    /// Returns server information and capabilities
    ///
    /// This is called during MCP initialization to communicate server metadata
    /// and supported features to the client.
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Binance Context Server".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Binance market data over MCP. Tools cover prices, 24h statistics, rankings, \
                order books, candlesticks, trades and exchange rules; get_account_balance needs \
                BINANCE_API_KEY and BINANCE_API_SECRET. Resources provide market-wide snapshots."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _params: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: crate::mcp::tools::list_tools(),
            next_cursor: None,
        })
    }

    /// Tool failures come back as `is_error` results, never as protocol errors
    async fn call_tool(
        &self,
        params: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(crate::mcp::tools::call_tool(&self.provider, &params.name, params.arguments).await)
    }

    /// Lists all available resources
    async fn list_resources(
        &self,
        _params: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: crate::mcp::resources::list_resources(),
            next_cursor: None,
        })
    }

    /// Reads a specific resource by URI
    async fn read_resource(
        &self,
        params: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let contents = crate::mcp::resources::read_resource(&self.provider, &params.uri).await?;

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}
