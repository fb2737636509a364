//! Integration tests for the FreezeGuard CLI
//!
//! These tests load snapshots and configs from disk and run the
//! commands the binary dispatches to.

use std::path::PathBuf;

use freezeguard_cli::{commands, AppContext};
use freezeguard_core::{Address, UserId};
use freezeguard_rules::{
    EngineVerdict, FreezeDirection, RuleEvent, VerdictLedger, REASON_RECEIVER_RESTRICTED,
    REASON_SENDER_RESTRICTED,
};
use tempfile::TempDir;

const NOW: i64 = 1_577_836_800;

fn addr(s: &str) -> Address {
    Address::new(s).unwrap()
}

/// alice (ti1, user 1) is frozen for sending around NOW,
/// bob (ti2, user 1) is unrestricted
const SNAPSHOT: &str = r#"{
  "users": [
    {
      "trusted_intermediary": "ti1",
      "user_id": 1,
      "addresses": ["alice", "alice-2"],
      "attributes": { "0": 1874872800, "120": 2, "121": 1577833200, "122": 1577840400, "123": 0 }
    },
    {
      "trusted_intermediary": "ti2",
      "user_id": 1,
      "addresses": ["bob"],
      "attributes": { "0": 1874872800 }
    }
  ]
}"#;

fn write_snapshot(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("registry.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    path
}

fn write_config(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("engine.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_load_defaults_to_snapshot_intermediaries() {
    let temp_dir = TempDir::new().unwrap();
    let registry = write_snapshot(&temp_dir);

    let ctx = AppContext::load(&registry, None).unwrap();
    assert_eq!(ctx.trusted_intermediaries(), vec![addr("ti1"), addr("ti2")]);
    assert!(!ctx.config.allow_not_found);
}

#[test]
fn test_load_rejects_missing_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    let err = AppContext::load(&missing, None).err().unwrap();
    assert!(err.to_string().contains("Failed to read registry snapshot"));
}

#[test]
fn test_check_sender_frozen_inside_window() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AppContext::load(&write_snapshot(&temp_dir), None).unwrap();

    let verdict = commands::check(&ctx, addr("alice"), addr("bob"), false, Some(NOW)).unwrap();
    assert_eq!(verdict, EngineVerdict::rejected(0, REASON_SENDER_RESTRICTED));

    // Second bound address resolves to the same user
    let verdict = commands::check(&ctx, addr("alice-2"), addr("bob"), false, Some(NOW)).unwrap();
    assert!(!verdict.valid);

    // Freeze is send-only
    let verdict = commands::check(&ctx, addr("bob"), addr("alice"), false, Some(NOW)).unwrap();
    assert_eq!(verdict, EngineVerdict::approved());
}

#[test]
fn test_check_sender_free_outside_window() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AppContext::load(&write_snapshot(&temp_dir), None).unwrap();

    let verdict =
        commands::check(&ctx, addr("alice"), addr("bob"), false, Some(NOW + 2 * 3600)).unwrap();
    assert_eq!(verdict, EngineVerdict::approved());
}

#[test]
fn test_check_unknown_receiver() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AppContext::load(&write_snapshot(&temp_dir), None).unwrap();

    let verdict = commands::check(&ctx, addr("bob"), addr("carol"), false, Some(NOW)).unwrap();
    assert_eq!(verdict, EngineVerdict::rejected(0, REASON_RECEIVER_RESTRICTED));

    let verdict = commands::check(&ctx, addr("bob"), addr("carol"), true, Some(NOW)).unwrap();
    assert_eq!(verdict, EngineVerdict::approved());
}

#[test]
fn test_config_restricts_intermediaries_and_writes_ledger() {
    let temp_dir = TempDir::new().unwrap();
    let ledger_path = temp_dir.path().join("audit").join("verdicts.jsonl");
    let config = write_config(
        &temp_dir,
        &format!(
            r#"{{ "trusted_intermediaries": ["ti2"], "allow_not_found": true, "ledger_path": {:?} }}"#,
            ledger_path.to_str().unwrap()
        ),
    );

    let ctx = AppContext::load(&write_snapshot(&temp_dir), Some(&config)).unwrap();
    assert_eq!(ctx.trusted_intermediaries(), vec![addr("ti2")]);

    // alice is only known to ti1, so her send freeze is out of reach;
    // allow_not_found lets the unknown sender through
    let verdict = commands::check(&ctx, addr("alice"), addr("bob"), false, Some(NOW)).unwrap();
    assert_eq!(verdict, EngineVerdict::approved());

    let events = VerdictLedger::new(&ledger_path).unwrap().read_all().unwrap();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        RuleEvent::TransferChecked { valid: true, rule_index: None, .. }
    ));
}

#[test]
fn test_inspect_resolved_address() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AppContext::load(&write_snapshot(&temp_dir), None).unwrap();

    let inspection = commands::inspect(&ctx, addr("alice-2"), Some(NOW)).unwrap();
    let user = inspection.user.clone().unwrap();
    assert_eq!(user.trusted_intermediary, addr("ti1"));
    assert_eq!(user.user_id, UserId(1));

    let profile = inspection.profile.unwrap();
    assert_eq!(profile.direction, FreezeDirection::Send);
    assert!(inspection.frozen_for_send);
    assert!(!inspection.frozen_for_receive);
    assert_eq!(inspection.at, NOW);

    let json = serde_json::to_value(&inspection).unwrap();
    assert_eq!(json["address"], "alice-2");
}

#[test]
fn test_inspect_unknown_address() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = AppContext::load(&write_snapshot(&temp_dir), None).unwrap();

    let inspection = commands::inspect(&ctx, addr("carol"), Some(NOW)).unwrap();
    assert!(inspection.user.is_none());
    assert!(inspection.profile.is_none());
    assert!(!inspection.frozen_for_send);
}
