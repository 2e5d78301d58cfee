//! Tool dispatcher and resource provider
//!
//! Maps tool names and resource URIs onto the validate, fetch and aggregate
//! pipeline. Every failure leaves as a [`ProviderError`].

pub mod capabilities;
pub mod params;
pub mod resources;
pub mod tools;

pub use capabilities::{resource_descriptors, tool_descriptors, ResourceDescriptor, ToolDescriptor};
pub use resources::ResourceUri;
pub use tools::ToolName;

use crate::binance::{BinanceClient, MarketDataApi};
use crate::config::Config;
use crate::error::{ProviderError, Result};
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;

/// Entry point for tool calls and resource reads
///
/// Cheap to clone; clones share the same client.
#[derive(Clone)]
pub struct BinanceProvider {
    api: Arc<dyn MarketDataApi>,
}

impl BinanceProvider {
    pub fn new(api: Arc<dyn MarketDataApi>) -> Self {
        Self { api }
    }

    /// Builds the HTTP client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(BinanceClient::new(config)?)))
    }

    /// Invoke a tool by name; an unknown name is `NotFound`
    pub async fn call_tool(&self, name: &str, args: Map<String, Value>) -> Result<Value> {
        let tool = ToolName::from_str(name)
            .map_err(|_| ProviderError::NotFound(format!("unknown tool: {}", name)))?;

        let result = tools::route_tool(self.api.as_ref(), tool, args).await;
        if let Err(err) = &result {
            tracing::warn!(tool = name, kind = %err.kind(), error = %err, "tool call failed");
        }
        result
    }

    /// Read a resource by URI; an unknown URI is `NotFound`
    pub async fn read_resource(&self, uri: &str) -> Result<Value> {
        let resource = ResourceUri::from_str(uri)?;

        let result = resources::route_resource(self.api.as_ref(), resource).await;
        if let Err(err) = &result {
            tracing::warn!(uri, kind = %err.kind(), error = %err, "resource read failed");
        }
        result
    }
}

impl std::fmt::Debug for BinanceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceProvider").finish_non_exhaustive()
    }
}
