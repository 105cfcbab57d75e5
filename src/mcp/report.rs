//! Field substitution for rendered reports.
//!
//! Report templates reference fields of the engine's structured result.
//! Historically a missing field was silently replaced by an illustrative
//! default, making a fallback indistinguishable from real engine output.
//! `ReportFields` records every substitution, and `appendix` renders a note
//! listing the fields that fell back so the report is honest about which
//! numbers were actually computed.

use serde_json::Value;

use crate::bridge::ProcessResult;

/// Accessor over a `ProcessResult` that tracks fallback substitutions.
pub struct ReportFields {
    data: Value,
    raw: Option<String>,
    fallbacks: Vec<&'static str>,
}

impl ReportFields {
    /// Wraps an interpreter result for template substitution.
    ///
    /// A raw result still gets one decode attempt, covering engines that
    /// return a string-encoded object rather than an object literal.
    pub fn new(result: &ProcessResult) -> Self {
        match result {
            ProcessResult::Parsed(value) => Self {
                data: value.clone(),
                raw: None,
                fallbacks: Vec::new(),
            },
            ProcessResult::Raw(text) => {
                let decoded = serde_json::from_str::<Value>(text)
                    .ok()
                    .filter(Value::is_object);
                let raw = if decoded.is_some() || text.is_empty() {
                    None
                } else {
                    Some(text.clone())
                };
                Self {
                    data: decoded.unwrap_or(Value::Null),
                    raw,
                    fallbacks: Vec::new(),
                }
            }
        }
    }

    /// Returns the string field `key`, or `default` with the fallback noted.
    pub fn text(&mut self, key: &'static str, default: &str) -> String {
        match self.data.get(key).and_then(Value::as_str) {
            Some(value) => value.to_string(),
            None => {
                self.fallbacks.push(key);
                default.to_string()
            }
        }
    }

    /// Returns the numeric field `key`, or `default` with the fallback noted.
    pub fn count(&mut self, key: &'static str, default: u64) -> u64 {
        match self.data.get(key).and_then(Value::as_u64) {
            Some(value) => value,
            None => {
                self.fallbacks.push(key);
                default
            }
        }
    }

    /// Whether every referenced field so far came from the engine.
    pub fn all_executed(&self) -> bool {
        self.fallbacks.is_empty()
    }

    /// Renders the report appendix: a note naming the fields that used
    /// illustrative defaults, plus the raw engine output when the result
    /// could not be decoded at all. Empty when everything was executed.
    pub fn appendix(&self) -> String {
        let mut out = String::new();
        if !self.fallbacks.is_empty() {
            out.push_str("\n\n---\n*Illustrative values (not returned by the engine): ");
            out.push_str(&self.fallbacks.join(", "));
            out.push('*');
        }
        if let Some(raw) = &self.raw {
            out.push_str("\n\n## Raw Engine Output\n```\n");
            out.push_str(raw);
            out.push_str("\n```");
        }
        out
    }
}
