//! MCP transport layer
//!
//! The server speaks MCP over standard I/O only.

pub mod stdio;

pub use stdio::run_stdio_server;
