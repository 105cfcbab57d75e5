//! Process bridge to the external APL interpreter.
//!
//! Every tool call spawns a fresh interpreter process, feeds it a script on
//! stdin, and collects stdout and stderr until the process exits. There is
//! no process pool and no state shared between invocations.

/// Script composition for the interpreter.
pub mod script;

use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::errors::{AplcdError, Result};

/// Outcome of one interpreter invocation.
///
/// `Parsed` means the combined output contained a decodable JSON object;
/// `Raw` means it did not, and carries the trimmed output verbatim. The
/// distinction is kept explicit so report rendering can tell real engine
/// data apart from unparseable output.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// The engine returned structured data.
    Parsed(Value),
    /// The engine produced output with no decodable object literal.
    Raw(String),
}

impl ProcessResult {
    /// Returns the structured value, if this result is `Parsed`.
    pub fn as_parsed(&self) -> Option<&Value> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Returns the raw text, if this result is `Raw`.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Parsed(_) => None,
            Self::Raw(text) => Some(text),
        }
    }
}

/// Bridge that executes scripts against the external APL interpreter.
///
/// The interpreter path and working directory are resolved once at
/// construction and reused for every call.
pub struct AplBridge {
    command: String,
    workdir: std::path::PathBuf,
    timeout_secs: u64,
    shutdown_directive: String,
}

impl AplBridge {
    /// Creates a bridge from the server configuration, resolving the
    /// interpreter path and working directory once.
    pub fn new(config: &ServerConfig) -> Self {
        let command = config.resolve_interpreter();
        let workdir = config.resolve_workdir();
        debug!(
            interpreter = %command,
            workdir = %workdir.display(),
            "bridge initialized"
        );
        Self {
            command,
            workdir,
            timeout_secs: config.timeout_secs,
            shutdown_directive: config.shutdown_directive.clone(),
        }
    }

    /// Executes a script in a fresh interpreter process.
    ///
    /// The script is written to the process's stdin followed by the shutdown
    /// directive, then stdin is closed. On a zero exit status the combined
    /// stdout and stderr text is scanned for a brace-delimited object
    /// literal; a decodable match yields `ProcessResult::Parsed`, anything
    /// else degrades to `ProcessResult::Raw`. A non-zero exit status fails
    /// with the accumulated stderr. The process is killed if it does not
    /// exit within the configured timeout.
    pub async fn execute(&self, script: &str) -> Result<ProcessResult> {
        let mut command = Command::new(&self.command);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .current_dir(&self.workdir)
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| AplcdError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("failed to capture interpreter stdin"))?;

        let payload = format!("{}\n{}\n", script, self.shutdown_directive);
        if let Err(e) = stdin.write_all(payload.as_bytes()).await {
            // The interpreter can exit before draining stdin; its exit
            // status and stderr carry the real diagnosis, not this EPIPE.
            debug!(error = %e, "interpreter closed stdin early");
        }
        drop(stdin);

        // kill_on_drop reaps the child when the timeout drops this future.
        let output = timeout(
            Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| {
            warn!(secs = self.timeout_secs, "interpreter timed out, killing");
            AplcdError::Timeout {
                secs: self.timeout_secs,
            }
        })??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(AplcdError::Interpreter {
                stderr: stderr.trim().to_string(),
            });
        }

        let combined = if stderr.trim().is_empty() {
            stdout.to_string()
        } else {
            format!("{}\n{}", stdout, stderr)
        };

        Ok(parse_output(&combined))
    }
}

/// Scans interpreter output for a brace-delimited object literal and
/// decodes it, degrading to raw text when no decodable object is present.
///
/// The match is greedy: from the first `{` to the last `}`, mirroring how
/// the engine emits a single JSON object surrounded by session noise.
fn parse_output(output: &str) -> ProcessResult {
    if let Some(candidate) = extract_object_literal(output) {
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) if value.is_object() => return ProcessResult::Parsed(value),
            Ok(_) | Err(_) => {
                debug!("object-like output did not decode, falling back to raw");
            }
        }
    }
    ProcessResult::Raw(output.trim().to_string())
}

/// Returns the greedy first-`{`-to-last-`}` slice of the output, if any.
fn extract_object_literal(output: &str) -> Option<&str> {
    let start = output.find('{')?;
    let end = output.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&output[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_object() {
        let result = parse_output(r#"{"total_dependencies": 38, "parallel_tasks": 31}"#);
        assert_eq!(
            result,
            ProcessResult::Parsed(json!({"total_dependencies": 38, "parallel_tasks": 31}))
        );
    }

    #[test]
    fn test_parse_object_surrounded_by_session_noise() {
        let output = "Dyalog APL/S-64\nclear ws\n{\"speedup\": \"533x faster\"}\n      ";
        let result = parse_output(output);
        assert_eq!(result, ProcessResult::Parsed(json!({"speedup": "533x faster"})));
    }

    #[test]
    fn test_parse_preserves_all_top_level_keys() {
        let output = r#"{"a": 1, "b": [2, 3], "c": {"d": 4}}"#;
        match parse_output(output) {
            ProcessResult::Parsed(value) => {
                let obj = value.as_object().unwrap();
                assert_eq!(obj.len(), 3);
                assert!(obj.contains_key("a"));
                assert!(obj.contains_key("b"));
                assert!(obj.contains_key("c"));
            }
            ProcessResult::Raw(_) => panic!("expected parsed result"),
        }
    }

    #[test]
    fn test_no_object_degrades_to_trimmed_raw() {
        let result = parse_output("  BUILD ORDER: Security ParallelPipeline  \n");
        assert_eq!(
            result,
            ProcessResult::Raw("BUILD ORDER: Security ParallelPipeline".to_string())
        );
    }

    #[test]
    fn test_undecodable_braces_degrade_to_raw() {
        let output = "{not json at all}";
        assert_eq!(result_raw(parse_output(output)), "{not json at all}");
    }

    #[test]
    fn test_reversed_braces_degrade_to_raw() {
        let output = "} noise {";
        assert_eq!(result_raw(parse_output(output)), "} noise {");
    }

    #[test]
    fn test_empty_output_is_empty_raw() {
        assert_eq!(result_raw(parse_output("   \n  ")), "");
    }

    #[test]
    fn test_extract_is_greedy_across_objects() {
        // Two objects in the output: the greedy match spans both and fails
        // to decode, so the whole thing degrades to raw.
        let output = r#"{"a": 1} {"b": 2}"#;
        assert_eq!(result_raw(parse_output(output)), output);
    }

    fn result_raw(result: ProcessResult) -> String {
        match result {
            ProcessResult::Raw(text) => text,
            ProcessResult::Parsed(value) => panic!("expected raw, got {value}"),
        }
    }
}
