// Library exports for binance-context-server

pub mod error;

// Binance API integration modules
pub mod binance; // Binance API client
pub mod config; // Configuration management

// Request pipeline
pub mod aggregate; // Rankings and summaries over fetched data
pub mod provider; // Tool dispatcher and resource provider
pub mod validate; // Argument normalization and bounds checks

#[cfg(feature = "mcp_server")]
pub mod mcp; // MCP server implementation

#[cfg(feature = "mcp_server")]
pub mod transport; // MCP transport layer (stdio)

pub use config::Config;
pub use error::{ErrorKind, ProviderError, Result};
pub use provider::BinanceProvider;
