//! MCP (Model Context Protocol) server for the APL-CD engine.
//!
//! Provides a JSON-RPC 2.0 interface over stdio so that AI assistants can
//! run dependency-analysis demonstrations against the external APL
//! interpreter. Exposes a fixed tool catalog; every call marshals its
//! arguments into an interpreter script and renders the result as markdown.

/// MCP server loop.
pub mod server;

/// Tool catalog and dispatch.
pub mod tools;

/// JSON-RPC 2.0 message types.
pub mod transport;

/// Report field substitution with fallback tracking.
pub mod report;

/// Static report templates.
pub mod templates;

pub use server::McpServer;
pub use tools::{get_tool_definitions, handle_tool_call, Tool, ToolDefinition};
pub use transport::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
