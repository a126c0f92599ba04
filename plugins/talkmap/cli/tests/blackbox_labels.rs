/// `talkmap labels` and classifier configuration through the CLI.
mod helpers;

use helpers::{cli_with_home, setup_conversations};
use predicates::prelude::*;

fn labels_stdout(tmp: &tempfile::TempDir, args: &[&str]) -> String {
    let output = cli_with_home(tmp)
        .arg("labels")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn labels_in_turn_then_event_order() {
    let (tmp, dir) = setup_conversations(&["greeting.json"]);
    let out = labels_stdout(&tmp, &[dir.join("greeting.json").to_str().unwrap()]);

    assert_eq!(
        out.trim_end(),
        "Intent: hello\nBranch: root\nIntent: pizza\nBranch: menu"
    );
}

#[test]
fn conversations_separated_by_blank_line() {
    let (tmp, dir) = setup_conversations(&["batch.jsonl"]);
    let out = labels_stdout(&tmp, &[dir.join("batch.jsonl").to_str().unwrap()]);

    // third record is the malformed line: an empty block
    assert_eq!(out, "Intent: a\nIntent: a\n\nBranch: start\nIntent: a\n\n\n");
}

#[test]
fn record_without_turns_prints_nothing() {
    let (tmp, dir) = setup_conversations(&["no_turns.json"]);
    let out = labels_stdout(&tmp, &[dir.join("no_turns.json").to_str().unwrap()]);
    assert_eq!(out.trim(), "");
}

#[test]
fn local_config_switches_to_pattern_scheme() {
    let (tmp, dir) = setup_conversations(&["custom_names.json"]);
    let yaml = r#"
classifier:
  scheme: pattern
  intent_pattern: "^intent\\."
  branch_pattern: "^step\\."
"#;
    std::fs::write(dir.join(".talkmap.yaml"), yaml).unwrap();

    let out = labels_stdout(&tmp, &[dir.join("custom_names.json").to_str().unwrap()]);
    assert_eq!(out.trim_end(), "Intent: hello\nBranch: welcome");
}

#[test]
fn global_config_prefixes_apply() {
    let (tmp, dir) = setup_conversations(&["custom_names.json"]);
    let yaml = "classifier:\n  intent_prefix: intent.\n  branch_prefix: step.\n";
    std::fs::write(tmp.path().join(".talkmap.yaml"), yaml).unwrap();

    let out = labels_stdout(&tmp, &[dir.join("custom_names.json").to_str().unwrap()]);
    assert_eq!(out.trim_end(), "Intent: hello\nBranch: welcome");
}

#[test]
fn local_config_overrides_global_key_by_key() {
    let (tmp, dir) = setup_conversations(&["custom_names.json"]);
    std::fs::write(
        tmp.path().join(".talkmap.yaml"),
        "classifier:\n  intent_prefix: intent.\n  branch_prefix: step.\n",
    )
    .unwrap();
    std::fs::write(dir.join(".talkmap.yaml"), "classifier:\n  intent_prefix: IntRec\n").unwrap();

    let out = labels_stdout(&tmp, &[dir.join("custom_names.json").to_str().unwrap()]);
    assert_eq!(out.trim_end(), "Branch: welcome\nIntent: legacy");
}

#[test]
fn explicit_config_must_exist() {
    let (tmp, dir) = setup_conversations(&["greeting.json"]);

    cli_with_home(&tmp)
        .args([
            "labels",
            dir.join("greeting.json").to_str().unwrap(),
            "--config",
            dir.join("missing.yaml").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn invalid_pattern_is_an_error() {
    let (tmp, dir) = setup_conversations(&["greeting.json"]);
    let config = dir.join("bad.yaml");
    std::fs::write(&config, "classifier:\n  scheme: pattern\n  intent_pattern: \"(\"\n").unwrap();

    cli_with_home(&tmp)
        .args([
            "labels",
            dir.join("greeting.json").to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid intent pattern"));
}

#[test]
fn config_command_prints_effective_yaml() {
    let (tmp, dir) = setup_conversations(&[]);
    std::fs::write(dir.join(".talkmap.yaml"), "output:\n  top: 3\n").unwrap();

    cli_with_home(&tmp)
        .args(["config", "--dir", dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("top: 3"))
        .stdout(predicate::str::contains("intent_prefix: IntRec"));
}

#[test]
fn config_init_writes_global_file_once() {
    let (tmp, _dir) = setup_conversations(&[]);

    cli_with_home(&tmp)
        .args(["config", "--init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote default config"));
    assert!(tmp.path().join(".talkmap.yaml").exists());

    cli_with_home(&tmp)
        .args(["config", "--init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config already exists"));
}
