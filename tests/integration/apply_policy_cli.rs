//! End-to-end tests for the apply-policy binary

use crate::integration::{spawn_guard, stderr, stdout, Sandbox};
use serde_json::{json, Value};
use std::fs;

const BIN: &str = env!("CARGO_BIN_EXE_apply-policy");

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_applies_policy_and_lists_paths() {
    let sandbox = Sandbox::new();
    sandbox.write_policy(
        r#"{
  "claude": { "permissionsAllow": ["Bash(git status)", "Read(*)"] },
  "gemini": { "forceMcpTrust": true }
}"#,
    );
    sandbox.write_home_file(
        ".claude/settings.local.json",
        r#"{"permissions": {"allow": ["Read(*)"], "ask": []}, "outputStyle": "concise"}"#,
    );
    sandbox.write_home_file(
        ".gemini/settings.json",
        r#"{"mcpServers": {"fs": {"command": "mcp-fs"}, "legacy": true}, "theme": "dark"}"#,
    );

    let _guard = spawn_guard();
    let output = sandbox
        .command(BIN)
        .arg("--hub-dir")
        .arg(sandbox.hub())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let claude_path = sandbox.home().join(".claude").join("settings.local.json");
    let gemini_path = sandbox.home().join(".gemini").join("settings.json");
    assert_eq!(
        stdout(&output),
        format!(
            "Applied user policy to:\n- {}\n- {}\n",
            claude_path.display(),
            gemini_path.display()
        )
    );
    assert_eq!(
        read_json(&claude_path),
        json!({
            "permissions": { "allow": ["Read(*)", "Bash(git status)"], "ask": [] },
            "outputStyle": "concise"
        })
    );
    assert_eq!(
        read_json(&gemini_path),
        json!({
            "mcpServers": { "fs": { "command": "mcp-fs", "trust": true }, "legacy": true },
            "theme": "dark"
        })
    );
}

#[test]
fn test_second_run_is_byte_identical() {
    let sandbox = Sandbox::new();
    sandbox.write_policy(r#"{"claude": {"permissionsAllow": ["A", "B"]}, "gemini": {"forceMcpTrust": true}}"#);
    sandbox.write_home_file(".gemini/settings.json", r#"{"mcpServers":{"x":{}}}"#);
    let claude_path = sandbox.home().join(".claude").join("settings.local.json");
    let gemini_path = sandbox.home().join(".gemini").join("settings.json");

    let _guard = spawn_guard();
    let run = || {
        let output = sandbox
            .command(BIN)
            .arg("--hub-dir")
            .arg(sandbox.hub())
            .output()
            .unwrap();
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        (fs::read(&claude_path).unwrap(), fs::read(&gemini_path).unwrap())
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn test_missing_policy_and_settings_create_files() {
    let sandbox = Sandbox::new();

    let _guard = spawn_guard();
    let output = sandbox
        .command(BIN)
        .arg("--hub-dir")
        .arg(sandbox.hub())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        fs::read_to_string(sandbox.home().join(".claude/settings.local.json")).unwrap(),
        "{\n  \"permissions\": {\n    \"allow\": []\n  }\n}\n"
    );
    assert_eq!(
        fs::read_to_string(sandbox.home().join(".gemini/settings.json")).unwrap(),
        "{}\n"
    );
}

#[test]
fn test_home_flag_overrides_env() {
    let sandbox = Sandbox::new();
    sandbox.write_policy(r#"{"claude": {"permissionsAllow": ["Glob(*)"]}}"#);
    let other_home = sandbox.dir.path().join("other-home");

    let _guard = spawn_guard();
    let output = sandbox
        .command(BIN)
        .arg("--hub-dir")
        .arg(sandbox.hub())
        .arg("--home")
        .arg(&other_home)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let listed: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(listed["updated"].as_array().unwrap().len(), 2);
    assert!(other_home.join(".claude/settings.local.json").exists());
    assert!(!sandbox.home().join(".claude").exists());
}

#[test]
fn test_malformed_settings_fails_and_leaves_file() {
    let sandbox = Sandbox::new();
    sandbox.write_policy(r#"{"claude": {"permissionsAllow": ["A"]}}"#);
    let path = sandbox.write_home_file(".claude/settings.local.json", "{ broken");

    let _guard = spawn_guard();
    let output = sandbox
        .command(BIN)
        .arg("--hub-dir")
        .arg(sandbox.hub())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: Invalid JSON in "));
    assert_eq!(fs::read_to_string(path).unwrap(), "{ broken");
}

#[test]
fn test_malformed_policy_fails() {
    let sandbox = Sandbox::new();
    sandbox.write_policy("not json");

    let _guard = spawn_guard();
    let output = sandbox
        .command(BIN)
        .arg("--hub-dir")
        .arg(sandbox.hub())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("user-policy.json"));
}

#[test]
fn test_unknown_flag_exits_with_one() {
    let sandbox = Sandbox::new();

    let _guard = spawn_guard();
    let output = sandbox.command(BIN).arg("--bogus").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
}
