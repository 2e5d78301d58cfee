//! MCP Server Implementation
//!
//! This module contains the BinanceServer struct which implements the MCP ServerHandler trait.

use crate::config::Config;
use crate::error::Result;
use crate::provider::BinanceProvider;

/// Main Binance MCP Server struct
///
/// Holds the provider that answers tool calls and resource reads. Clones
/// share the underlying HTTP client.
#[derive(Clone, Debug)]
pub struct BinanceServer {
    pub provider: BinanceProvider,
}

impl BinanceServer {
    pub fn new(provider: BinanceProvider) -> Self {
        Self { provider }
    }

    /// Creates a server backed by the Binance REST API described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(BinanceProvider::from_config(config)?))
    }
}
