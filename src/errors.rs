use thiserror::Error;

/// Errors that can occur while serving or executing MCP tool calls.
#[derive(Error, Debug)]
pub enum AplcdError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("APL execution failed: {stderr}")]
    Interpreter { stderr: String },

    #[error("failed to spawn interpreter '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("interpreter did not finish within {secs}s")]
    Timeout { secs: u64 },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `AplcdError`.
pub type Result<T> = std::result::Result<T, AplcdError>;
