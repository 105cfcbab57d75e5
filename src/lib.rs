pub mod bridge;
pub mod config;
pub mod errors;
pub mod mcp;
