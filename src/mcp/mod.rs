//! Model Context Protocol (MCP) server.
//!
//! Exposes configuration lookup, source scanning and translation to AI
//! coding agents over stdio.

mod server;
pub mod types;

pub use server::{LocaleMcpServer, run_server};
