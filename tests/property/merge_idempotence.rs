//! Property-based tests for settings merge idempotence

use agenthub::policy::{
    ensure_claude_permissions, ensure_gemini_mcp_trust, ClaudePolicy, ClaudeSettings, GeminiPolicy,
    GeminiSettings,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

fn rule() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,6}(\\([a-z *]{0,8}\\))?"
}

/// Granting preserves existing order, appends in policy order, and never duplicates
#[test]
fn test_grant_preserves_order_without_duplicates() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(rule(), 0..8),
                prop::collection::vec(rule(), 0..8),
            ),
            |(existing, requested)| {
                let mut existing_unique = Vec::new();
                for r in existing {
                    if !existing_unique.contains(&r) {
                        existing_unique.push(r);
                    }
                }

                let mut settings: ClaudeSettings =
                    serde_json::from_value(json!({ "permissions": { "allow": &existing_unique } }))
                        .unwrap();
                settings.grant(&requested).unwrap();

                let allow: Vec<String> =
                    settings.allowed().into_iter().map(str::to_string).collect();
                prop_assert_eq!(&allow[..existing_unique.len()], &existing_unique[..]);

                let unique: HashSet<&String> = allow.iter().collect();
                prop_assert_eq!(unique.len(), allow.len());
                for r in &requested {
                    prop_assert!(allow.contains(r));
                }

                let appended: Vec<&String> = allow[existing_unique.len()..].iter().collect();
                let mut expected: Vec<&String> = Vec::new();
                for r in &requested {
                    if !existing_unique.contains(r) && !expected.contains(&r) {
                        expected.push(r);
                    }
                }
                prop_assert_eq!(appended, expected);

                Ok(())
            },
        )
        .unwrap();
}

/// Applying the same rules twice leaves the Claude settings file byte-identical
#[test]
fn test_claude_merge_is_idempotent_on_disk() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(rule(), 0..6), |requested| {
            let temp = tempfile::tempdir().unwrap();
            std::fs::create_dir_all(temp.path().join(".claude")).unwrap();
            std::fs::write(
                temp.path().join(".claude").join("settings.local.json"),
                r#"{"env": {"X": "1"}, "permissions": {"allow": ["Read(*)"], "deny": []}}"#,
            )
            .unwrap();

            let policy = ClaudePolicy {
                permissions_allow: requested,
            };
            let path = ensure_claude_permissions(temp.path(), &policy).unwrap();
            let first = std::fs::read(&path).unwrap();
            ensure_claude_permissions(temp.path(), &policy).unwrap();
            let second = std::fs::read(&path).unwrap();

            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}

/// Trusting servers twice equals trusting once, and non-object entries are untouched
#[test]
fn test_gemini_trust_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let entry = prop_oneof![
        Just(json!({})),
        Just(json!({"command": "mcp"})),
        Just(json!({"url": "http://x", "trust": false})),
        Just(json!("not-a-map")),
        Just(json!(7)),
    ];

    runner
        .run(
            &prop::collection::vec(("[a-z]{1,5}", entry), 0..6),
            |servers| {
                let map: Map<String, Value> = servers.into_iter().collect();
                let mut root = Map::new();
                root.insert("mcpServers".to_string(), Value::Object(map.clone()));
                let mut settings = GeminiSettings::from(root);

                settings.trust_all_servers().unwrap();
                let once = settings.clone();
                settings.trust_all_servers().unwrap();
                prop_assert_eq!(&settings, &once);

                let trusted = once.mcp_servers().unwrap();
                for (name, original) in &map {
                    match original {
                        Value::Object(_) => {
                            prop_assert_eq!(&trusted[name]["trust"], &json!(true));
                        }
                        other => {
                            prop_assert_eq!(&trusted[name], other);
                        }
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Writing Gemini trust twice leaves the file byte-identical
#[test]
fn test_gemini_merge_is_idempotent_on_disk() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(temp.path().join(".gemini")).unwrap();
    std::fs::write(
        temp.path().join(".gemini").join("settings.json"),
        r#"{"theme": "dark", "mcpServers": {"b": {"cmd": "x"}, "a": {"trust": false}}}"#,
    )
    .unwrap();

    let policy = GeminiPolicy {
        force_mcp_trust: true,
    };
    let path = ensure_gemini_mcp_trust(temp.path(), &policy).unwrap();
    let first = std::fs::read(&path).unwrap();
    ensure_gemini_mcp_trust(temp.path(), &policy).unwrap();

    assert_eq!(first, std::fs::read(&path).unwrap());
}
