//! Composition of interpreter scripts.
//!
//! Tool handlers never splice argument text directly into a script. They
//! build a `WrapperCall` with typed arguments; rendering escapes string
//! literals and formats numeric vectors, so a quote in an argument cannot
//! change the meaning of the generated script.

use std::fmt::Write;

/// Source location of the engine's MCP wrapper namespace.
const WRAPPER_SOURCE: &str = "file://apl-mcp/mcp-wrapper.dyalog";

/// Namespace the wrapper functions live in.
const WRAPPER_NAMESPACE: &str = "MCPWrapper";

/// A typed argument to a wrapper function.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptArg {
    /// A character vector, rendered as an escaped APL string literal.
    Text(String),
    /// A numeric vector, rendered space-separated.
    Numbers(Vec<u64>),
}

/// One load-and-invoke call into the engine's wrapper namespace.
///
/// Rendering produces the fixed pattern the engine expects: fix the wrapper
/// source, initialize the namespace, invoke the function with its arguments,
/// and serialize the result to JSON for the bridge to pick up.
#[derive(Debug, Clone)]
pub struct WrapperCall {
    function: &'static str,
    args: Vec<ScriptArg>,
}

impl WrapperCall {
    /// Creates a call to the named wrapper function with no arguments.
    pub fn new(function: &'static str) -> Self {
        Self {
            function,
            args: Vec::new(),
        }
    }

    /// Appends a character-vector argument.
    pub fn text_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(ScriptArg::Text(value.into()));
        self
    }

    /// Appends a numeric-vector argument.
    pub fn numeric_arg(mut self, values: &[u64]) -> Self {
        self.args.push(ScriptArg::Numbers(values.to_vec()));
        self
    }

    /// Renders the complete script for the bridge.
    pub fn render(&self) -> String {
        let mut script = String::new();
        let _ = writeln!(script, "⎕FIX'{}'", WRAPPER_SOURCE);
        let _ = writeln!(script, "{}.Initialize", WRAPPER_NAMESPACE);

        let mut invocation = format!("result ← {}.{}", WRAPPER_NAMESPACE, self.function);
        for arg in &self.args {
            invocation.push(' ');
            match arg {
                ScriptArg::Text(text) => invocation.push_str(&apl_string_literal(text)),
                ScriptArg::Numbers(values) => invocation.push_str(&numeric_vector(values)),
            }
        }
        let _ = writeln!(script, "{}", invocation);
        let _ = writeln!(script, "{}.ToJSON result", WRAPPER_NAMESPACE);
        script
    }
}

/// Renders a string as an APL character-vector literal.
///
/// APL escapes an embedded quote by doubling it; newlines are dropped since
/// a character vector cannot span source lines.
pub fn apl_string_literal(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    format!("'{}'", cleaned.replace('\'', "''"))
}

/// Renders a numeric vector as a space-separated literal.
pub fn numeric_vector(values: &[u64]) -> String {
    values
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
