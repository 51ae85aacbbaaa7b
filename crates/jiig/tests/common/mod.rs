//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

/// A small export: one failed job feeding a pipeline, a healthy pair and an
/// isolated job, with a duplicated failed row, a self-loop and a bad line.
pub const SAMPLE_EXPORT: &str = r#"{"result_type":"NODES","id":1,"name":"ingest","type":"JOB","is_failed":false,"status":"SUCCESS"}
{"result_type":"NODES","id":1,"name":"ingest","type":"JOB","is_failed":true,"status":"FAILED","last_failed_time":"2024-01-02 06:00:00","failure_count":3}
{"result_type":"NODES","id":"2","name":"daily report","type":"PIPELINE","is_failed":false}
{"result_type":"NODES","id":"3","name":"cleanup","type":"JOB"}
{"result_type":"NODES","id":"4","name":"archive","type":"JOB"}
{"result_type":"NODES","id":"5","name":"orphan","type":"JOB"}
{"result_type":"EDGES","id":"e1","source_id":1,"target_id":"2","connecting_table":"raw.events"}
{"result_type":"EDGES","id":"e2","source_id":"3","target_id":"4","connecting_table":"stage.files"}
{"result_type":"EDGES","id":"e3","source_id":"4","target_id":"4"}

this line is not json
"#;

/// Write `content` as `dag.jsonl` in `dir`.
pub fn write_export(dir: &Path, content: &str) {
    std::fs::write(dir.join("dag.jsonl"), content).expect("Failed to write export");
}

/// Run the jiig binary in the specified directory with a clean environment
pub fn run_jiig_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jiig"))
        .args(args)
        .current_dir(dir)
        .env_remove("JIIG_CONFIG")
        .env_remove("JIIG_DATA_FILE")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute jiig")
}

/// Stdout of a run as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a run as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parse stdout of a successful run as JSON
pub fn json_stdout(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "jiig failed: {}",
        stderr(output)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
