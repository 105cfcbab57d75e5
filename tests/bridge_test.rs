//! Bridge tests against `/bin/sh` standing in for the APL interpreter.
//!
//! The shutdown directive is configurable precisely so these tests can use
//! a shell-friendly one.
#![cfg(unix)]

use aplcd_mcp::bridge::{AplBridge, ProcessResult};
use aplcd_mcp::config::ServerConfig;
use aplcd_mcp::errors::AplcdError;
use serde_json::json;

fn sh_bridge(timeout_secs: u64) -> AplBridge {
    AplBridge::new(&ServerConfig {
        interpreter: Some("/bin/sh".to_string()),
        workdir: Some(std::env::temp_dir()),
        timeout_secs,
        shutdown_directive: "true".to_string(),
    })
}

#[tokio::test]
async fn test_parsed_object_from_stdout() {
    let bridge = sh_bridge(5);
    let result = bridge
        .execute(r#"echo '{"total_dependencies": 14, "parallel_tasks": 9}'"#)
        .await
        .unwrap();
    assert_eq!(
        result,
        ProcessResult::Parsed(json!({"total_dependencies": 14, "parallel_tasks": 9}))
    );
}

#[tokio::test]
async fn test_object_found_amid_session_noise() {
    let bridge = sh_bridge(5);
    let result = bridge
        .execute("echo 'clear ws'; echo '{\"speedup\": \"56x faster\"}'; echo done-ish")
        .await
        .unwrap();
    // Greedy scan still lands on the single object literal.
    assert_eq!(result, ProcessResult::Parsed(json!({"speedup": "56x faster"})));
}

#[tokio::test]
async fn test_raw_fallback_is_trimmed() {
    let bridge = sh_bridge(5);
    let result = bridge.execute("echo '  BUILD ORDER: A B C  '").await.unwrap();
    assert_eq!(result, ProcessResult::Raw("BUILD ORDER: A B C".to_string()));
}

#[tokio::test]
async fn test_stderr_participates_in_scan() {
    let bridge = sh_bridge(5);
    let result = bridge
        .execute(r#"echo '{"status": "SUCCESS"}' >&2"#)
        .await
        .unwrap();
    assert_eq!(result, ProcessResult::Parsed(json!({"status": "SUCCESS"})));
}

#[tokio::test]
async fn test_nonzero_exit_carries_stderr() {
    let bridge = sh_bridge(5);
    let err = bridge
        .execute("echo 'SYNTAX ERROR' >&2; exit 3")
        .await
        .unwrap_err();
    match err {
        AplcdError::Interpreter { stderr } => assert_eq!(stderr, "SYNTAX ERROR"),
        other => panic!("expected Interpreter error, got {other}"),
    }
}

#[tokio::test]
async fn test_hung_interpreter_times_out() {
    let bridge = sh_bridge(1);
    let err = bridge.execute("sleep 30").await.unwrap_err();
    match err {
        AplcdError::Timeout { secs } => assert_eq!(secs, 1),
        other => panic!("expected Timeout error, got {other}"),
    }
}

#[tokio::test]
async fn test_missing_interpreter_fails_to_spawn() {
    let bridge = AplBridge::new(&ServerConfig {
        interpreter: Some("/nonexistent/path/to/mapl".to_string()),
        workdir: Some(std::env::temp_dir()),
        ..Default::default()
    });
    let err = bridge.execute("whatever").await.unwrap_err();
    match err {
        AplcdError::Spawn { command, .. } => {
            assert_eq!(command, "/nonexistent/path/to/mapl");
        }
        other => panic!("expected Spawn error, got {other}"),
    }
}

#[tokio::test]
async fn test_back_to_back_calls_are_independent() {
    let failing = sh_bridge(5);
    let first = failing.execute("exit 1").await;
    assert!(first.is_err());

    // A failed invocation leaves nothing behind; the next call spawns a
    // fresh process and succeeds.
    let second = failing
        .execute(r#"echo '{"analysis_time": "5ms"}'"#)
        .await
        .unwrap();
    assert_eq!(second, ProcessResult::Parsed(json!({"analysis_time": "5ms"})));
}
