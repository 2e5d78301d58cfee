//! Model Context Protocol (MCP) server implementation
//!
//! Adapts [`crate::provider::BinanceProvider`] to the rmcp `ServerHandler`
//! trait: tool listing and invocation plus resource listing and reads.

pub mod handler;
pub mod resources;
pub mod server;
pub mod tools;

// Re-exports
pub use server::BinanceServer;
