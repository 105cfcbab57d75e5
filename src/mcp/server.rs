//! MCP server loop: JSON-RPC 2.0 over stdin/stdout.
//!
//! Exposes the tool catalog to AI assistants. Protocol-level errors are
//! reserved for malformed JSON-RPC traffic; anything a tool handler can
//! fail with (unknown tool, interpreter failure, timeout) is reported as a
//! successful envelope whose text block begins `Error: `, so the transport
//! never sees a failed call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::bridge::AplBridge;
use crate::errors::Result;

use super::tools::{get_tool_definitions, handle_tool_call};
use super::transport::{ErrorCode, JsonRpcRequest, JsonRpcResponse};

/// Runtime counters for the server.
struct ServerStats {
    started_at: Instant,
    total_requests: AtomicU64,
    tool_calls: AtomicU64,
    soft_errors: AtomicU64,
}

impl ServerStats {
    fn new() -> Self {
        Self {
            started_at: Instant::now(),
            total_requests: AtomicU64::new(0),
            tool_calls: AtomicU64::new(0),
            soft_errors: AtomicU64::new(0),
        }
    }
}

/// The MCP server wrapping the interpreter bridge.
pub struct McpServer {
    bridge: AplBridge,
    stats: ServerStats,
}

impl McpServer {
    /// Creates a server backed by the given bridge.
    pub fn new(bridge: AplBridge) -> Self {
        Self {
            bridge,
            stats: ServerStats::new(),
        }
    }

    /// Runs the server until stdin is closed.
    ///
    /// Each non-empty line is parsed as one JSON-RPC request; each response
    /// is written as one line to stdout. Diagnostics go to stderr via
    /// `tracing` so stdout stays protocol-clean.
    pub async fn run(&self) -> Result<()> {
        info!("MCP server running on stdio");
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(&request).await,
                Err(e) => Some(JsonRpcResponse::error(
                    Value::Null,
                    ErrorCode::ParseError,
                    format!("failed to parse JSON-RPC request: {}", e),
                )),
            };

            if let Some(resp) = response {
                let encoded = match serde_json::to_string(&resp) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!(error = %e, "failed to serialize response");
                        continue;
                    }
                };
                if let Err(e) = stdout.write_all(encoded.as_bytes()).await {
                    warn!(error = %e, "failed to write response");
                    break;
                }
                if let Err(e) = stdout.write_all(b"\n").await {
                    warn!(error = %e, "failed to write response terminator");
                    break;
                }
                if let Err(e) = stdout.flush().await {
                    warn!(error = %e, "failed to flush stdout");
                    break;
                }
            }
        }

        info!(
            uptime_secs = self.stats.started_at.elapsed().as_secs(),
            total_requests = self.stats.total_requests.load(Ordering::Relaxed),
            tool_calls = self.stats.tool_calls.load(Ordering::Relaxed),
            soft_errors = self.stats.soft_errors.load(Ordering::Relaxed),
            "stdin closed, shutting down"
        );
        Ok(())
    }

    /// Dispatches one request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id)),
            "initialized" | "notifications/initialized" => None,
            "tools/list" => Some(JsonRpcResponse::success(
                id,
                json!({ "tools": get_tool_definitions() }),
            )),
            "tools/call" => Some(self.handle_tools_call(id, &request.params).await),
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            other => Some(JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("method not found: {}", other),
            )),
        }
    }

    /// Handles `initialize`, announcing server identity and capabilities.
    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "aplcd-mcp",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    /// Handles `tools/call`.
    ///
    /// Missing params or a missing tool name are protocol errors. Anything
    /// past that boundary is soft: the handler's error text is wrapped in a
    /// successful envelope as `Error: <message>`.
    async fn handle_tools_call(&self, id: Value, params: &Option<Value>) -> JsonRpcResponse {
        let params = match params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(
                    id,
                    ErrorCode::InvalidParams,
                    "missing params for tools/call".to_string(),
                );
            }
        };

        let tool_name = match params.get("name").and_then(Value::as_str) {
            Some(name) => name,
            None => {
                return JsonRpcResponse::error(
                    id,
                    ErrorCode::InvalidParams,
                    "missing 'name' in tools/call params".to_string(),
                );
            }
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
        self.stats.tool_calls.fetch_add(1, Ordering::Relaxed);

        let text = match handle_tool_call(&self.bridge, tool_name, &arguments).await {
            Ok(report) => report,
            Err(e) => {
                self.stats.soft_errors.fetch_add(1, Ordering::Relaxed);
                debug!(tool = tool_name, error = %e, "tool call failed");
                format!("Error: {}", e)
            }
        };

        JsonRpcResponse::success(
            id,
            json!({
                "content": [{ "type": "text", "text": text }]
            }),
        )
    }
}
