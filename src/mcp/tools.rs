//! Tool catalog and dispatch.
//!
//! The catalog is a fixed set of tagged variants, one per tool, each bound
//! to exactly one handler. Definitions carry JSON Schema descriptions so
//! MCP clients can discover arguments, enums, and defaults; arguments are
//! not validated server-side beyond reading them with their defaults.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::bridge::script::WrapperCall;
use crate::bridge::{AplBridge, ProcessResult};
use crate::errors::{AplcdError, Result};

use super::templates;

/// Default project sizes for the performance benchmark.
pub const DEFAULT_PROJECT_SIZES: &[u64] = &[10, 25, 50, 100];

/// Default file scanned by the security scan.
pub const DEFAULT_SCAN_FILE: &str = "src/APLCICD.dyalog";

/// Default path analyzed by the generic project analysis.
pub const DEFAULT_PROJECT_PATH: &str = ".";

/// A tool definition exposed by the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The authoritative tool set, one variant per tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    AnalyzeSpringPetclinic,
    BenchmarkPerformance,
    RunSecurityScan,
    ExplainMatrixOperations,
    CompareWithMaven,
    AnalyzeProject,
}

impl Tool {
    /// All tools in catalog declaration order.
    pub const ALL: [Tool; 6] = [
        Tool::AnalyzeSpringPetclinic,
        Tool::BenchmarkPerformance,
        Tool::RunSecurityScan,
        Tool::ExplainMatrixOperations,
        Tool::CompareWithMaven,
        Tool::AnalyzeProject,
    ];

    /// The tool's wire name.
    pub fn name(self) -> &'static str {
        match self {
            Tool::AnalyzeSpringPetclinic => "analyze_spring_petclinic",
            Tool::BenchmarkPerformance => "benchmark_performance",
            Tool::RunSecurityScan => "run_security_scan",
            Tool::ExplainMatrixOperations => "explain_matrix_operations",
            Tool::CompareWithMaven => "compare_with_maven",
            Tool::AnalyzeProject => "analyze_project",
        }
    }

    /// Looks a tool up by wire name.
    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// The tool's catalog entry.
    fn definition(self) -> ToolDefinition {
        match self {
            Tool::AnalyzeSpringPetclinic => ToolDefinition {
                name: self.name().to_string(),
                description: "Analyze Spring PetClinic project dependencies using APL-CD matrix operations".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            Tool::BenchmarkPerformance => ToolDefinition {
                name: self.name().to_string(),
                description: "Run performance benchmarks comparing APL-CD vs traditional CI/CD".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "project_sizes": {
                            "type": "array",
                            "items": { "type": "number" },
                            "description": "Project sizes (task counts) to benchmark",
                            "default": DEFAULT_PROJECT_SIZES
                        }
                    }
                }),
            },
            Tool::RunSecurityScan => ToolDefinition {
                name: self.name().to_string(),
                description: "Perform a security scan on an APL source file".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "file": {
                            "type": "string",
                            "description": "File to scan (defaults to the main module)",
                            "default": DEFAULT_SCAN_FILE
                        }
                    }
                }),
            },
            Tool::ExplainMatrixOperations => ToolDefinition {
                name: self.name().to_string(),
                description: "Explain how APL-CD uses matrix operations for dependency resolution".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "complexity_level": {
                            "type": "string",
                            "enum": templates::COMPLEXITY_LEVELS,
                            "description": "Level of technical detail",
                            "default": templates::DEFAULT_COMPLEXITY_LEVEL
                        }
                    }
                }),
            },
            Tool::CompareWithMaven => ToolDefinition {
                name: self.name().to_string(),
                description: "Compare APL-CD performance with Maven on real projects".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "project_type": {
                            "type": "string",
                            "enum": templates::PROJECT_TYPES,
                            "description": "Type of project to compare",
                            "default": templates::DEFAULT_PROJECT_TYPE
                        }
                    }
                }),
            },
            Tool::AnalyzeProject => ToolDefinition {
                name: self.name().to_string(),
                description: "Analyze any APL project or file using APL-CD dependency resolution".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "project_path": {
                            "type": "string",
                            "description": "Path to an APL project file or directory",
                            "default": DEFAULT_PROJECT_PATH
                        }
                    }
                }),
            },
        }
    }
}

/// Returns the full catalog in declaration order.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    Tool::ALL.iter().map(|t| t.definition()).collect()
}

/// Dispatches a tool call to its handler, returning the report text.
///
/// An unknown name fails with `UnknownTool`; the server boundary converts
/// any error here into `Error: …` response text, never a protocol error.
pub async fn handle_tool_call(bridge: &AplBridge, name: &str, args: &Value) -> Result<String> {
    let tool = Tool::from_name(name).ok_or_else(|| AplcdError::UnknownTool {
        name: name.to_string(),
    })?;
    debug!(tool = name, "dispatching tool call");

    match tool {
        Tool::AnalyzeSpringPetclinic => analyze_spring_petclinic(bridge).await,
        Tool::BenchmarkPerformance => benchmark_performance(bridge, args).await,
        Tool::RunSecurityScan => run_security_scan(bridge, args).await,
        Tool::ExplainMatrixOperations => Ok(explain_matrix_operations(args)),
        Tool::CompareWithMaven => Ok(compare_with_maven(args)),
        Tool::AnalyzeProject => analyze_project(bridge, args).await,
    }
}

/// Handles `analyze_spring_petclinic`.
async fn analyze_spring_petclinic(bridge: &AplBridge) -> Result<String> {
    let script = WrapperCall::new("SpringPetclinicAnalysis").render();
    let result = bridge.execute(&script).await?;
    Ok(templates::petclinic_report(&result))
}

/// Handles `benchmark_performance`.
async fn benchmark_performance(bridge: &AplBridge, args: &Value) -> Result<String> {
    let sizes = project_sizes(args);
    let script = WrapperCall::new("PerformanceBenchmark")
        .numeric_arg(&sizes)
        .render();
    let result = bridge.execute(&script).await?;
    Ok(templates::benchmark_report(&result))
}

/// Handles `run_security_scan`.
async fn run_security_scan(bridge: &AplBridge, args: &Value) -> Result<String> {
    let file = string_arg(args, "file", DEFAULT_SCAN_FILE);
    let script = WrapperCall::new("SecurityScanMCP").text_arg(&file).render();
    let result = bridge.execute(&script).await?;
    Ok(templates::security_report(&result, &file))
}

/// Handles `explain_matrix_operations`. Purely template selection; the
/// bridge is not involved.
fn explain_matrix_operations(args: &Value) -> String {
    let level = string_arg(args, "complexity_level", templates::DEFAULT_COMPLEXITY_LEVEL);
    templates::matrix_explanation(&level).to_string()
}

/// Handles `compare_with_maven`. Purely template substitution; an
/// out-of-enum project type falls back to the default.
fn compare_with_maven(args: &Value) -> String {
    let mut project_type = string_arg(args, "project_type", templates::DEFAULT_PROJECT_TYPE);
    if !templates::PROJECT_TYPES.contains(&project_type.as_str()) {
        project_type = templates::DEFAULT_PROJECT_TYPE.to_string();
    }
    templates::maven_comparison(&project_type)
}

/// Handles `analyze_project`.
async fn analyze_project(bridge: &AplBridge, args: &Value) -> Result<String> {
    let path = string_arg(args, "project_path", DEFAULT_PROJECT_PATH);
    let script = WrapperCall::new("ProjectAnalysis").text_arg(&path).render();
    let result = bridge.execute(&script).await?;
    Ok(templates::project_report(&result, &path))
}

/// Reads a string argument, substituting the schema default when absent.
fn string_arg(args: &Value, key: &str, default: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Reads the `project_sizes` array, substituting the schema default when
/// absent or empty. Non-numeric entries are skipped.
fn project_sizes(args: &Value) -> Vec<u64> {
    let sizes: Vec<u64> = args
        .get("project_sizes")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default();
    if sizes.is_empty() {
        DEFAULT_PROJECT_SIZES.to_vec()
    } else {
        sizes
    }
}

/// Renders an interpreter result for the one-shot CLI path.
pub fn format_process_result(result: &ProcessResult) -> String {
    match result {
        ProcessResult::Parsed(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        ProcessResult::Raw(text) => text.clone(),
    }
}
