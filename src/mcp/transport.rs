//! JSON-RPC 2.0 message types for the stdio transport.
//!
//! The adapter speaks newline-delimited JSON-RPC 2.0 with the MCP client.
//! Only the message shapes live here; the read/write loop is in `server`.

use serde::{Deserialize, Serialize};

/// An inbound JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version; must be `"2.0"`.
    pub jsonrpc: String,
    /// Request identifier: number, string, or null. Absent for
    /// notifications.
    #[serde(default)]
    pub id: serde_json::Value,
    /// The RPC method name.
    pub method: String,
    /// Optional method parameters.
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Whether this request is a notification (no `id`, no response owed).
    pub fn is_notification(&self) -> bool {
        self.id.is_null()
    }
}

/// An outbound JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version; always `"2.0"`.
    pub jsonrpc: String,
    /// Identifier of the request being answered.
    pub id: serde_json::Value,
    /// Result payload on success; absent on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error object on failure; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Builds a success response carrying `result`.
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response with a standard code and message.
    pub fn error(id: serde_json::Value, code: ErrorCode, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: code.as_i32(),
                message,
                data: None,
            }),
        }
    }

    /// Whether this response carries a protocol-level error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Numeric error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Standard JSON-RPC 2.0 error codes.
///
/// Tool-level failures never use these; they are reported as successful
/// envelopes with `Error: …` text. These codes cover only malformed
/// protocol traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid JSON was received.
    ParseError,
    /// The request is not a valid JSON-RPC request.
    InvalidRequest,
    /// The requested method does not exist.
    MethodNotFound,
    /// Invalid method parameters.
    InvalidParams,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// The numeric code defined by JSON-RPC 2.0.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_request() {
        let msg = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": { "name": "benchmark_performance", "arguments": {} }
        });

        let request: JsonRpcRequest = serde_json::from_value(msg).unwrap();
        assert_eq!(request.method, "tools/call");
        assert_eq!(request.id, json!(7));
        assert!(!request.is_notification());
    }

    #[test]
    fn test_notification_has_no_id() {
        let msg = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        let request: JsonRpcRequest = serde_json::from_value(msg).unwrap();
        assert!(request.is_notification());
        assert!(request.params.is_none());
    }

    #[test]
    fn test_string_ids_are_preserved() {
        let msg = json!({ "jsonrpc": "2.0", "id": "call-9", "method": "ping" });
        let request: JsonRpcRequest = serde_json::from_value(msg).unwrap();
        assert_eq!(request.id, json!("call-9"));
    }

    #[test]
    fn test_success_response_omits_error_field() {
        let response = JsonRpcResponse::success(json!(1), json!({"tools": []}));
        assert!(!response.is_error());

        let encoded = serde_json::to_string(&response).unwrap();
        assert!(encoded.contains("\"jsonrpc\":\"2.0\""));
        assert!(!encoded.contains("\"error\""));
    }

    #[test]
    fn test_error_response_omits_result_field() {
        let response = JsonRpcResponse::error(
            json!(1),
            ErrorCode::MethodNotFound,
            "method not found: resources/list".to_string(),
        );
        assert!(response.is_error());

        let encoded = serde_json::to_string(&response).unwrap();
        assert!(encoded.contains("-32601"));
        assert!(!encoded.contains("\"result\""));
    }

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ParseError.as_i32(), -32700);
        assert_eq!(ErrorCode::InvalidRequest.as_i32(), -32600);
        assert_eq!(ErrorCode::MethodNotFound.as_i32(), -32601);
        assert_eq!(ErrorCode::InvalidParams.as_i32(), -32602);
        assert_eq!(ErrorCode::InternalError.as_i32(), -32603);
    }
}
