use serde_json::{Value, json};
use std::io::Write;
use std::process::{Command, Output};

fn eternotes(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eternotes"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run eternotes")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "stdout is not json ({err})\nstdout={}\nstderr={}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

fn dry_run_config() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(file, "site: nova\nsink:\n  kind: dry-run").expect("write config");
    file
}

#[test]
fn check_lists_every_bad_field_and_exits_1() {
    let output = eternotes(&[
        "check", "--name", "J", "--email", "bad", "--message", "short",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_json(&output),
        json!({
            "valid": false,
            "errors": {
                "name": "Name must be at least 2 characters",
                "email": "Please enter a valid email address",
                "message": "Message must be at least 10 characters",
            }
        })
    );
}

#[test]
fn check_passes_a_complete_form() {
    let output = eternotes(&[
        "check",
        "--name",
        "Jo",
        "--email",
        "jo@example.com",
        "--message",
        "Hello there friend",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output), json!({ "valid": true, "errors": {} }));
}

#[test]
fn submit_through_dry_run_sink_succeeds_and_clears_form() {
    let config = dry_run_config();
    let config_path = config.path().to_str().expect("utf8 path");
    let output = eternotes(&[
        "submit",
        "--config",
        config_path,
        "--name",
        "Jo",
        "--email",
        "jo@example.com",
        "--year",
        "junior",
        "--instrument",
        "Drums",
        "--message",
        "Hello there friend",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let snapshot = stdout_json(&output);
    assert_eq!(snapshot["submission"], json!({ "state": "success" }));
    assert_eq!(snapshot["errors"], json!({}));
    assert_eq!(snapshot["fields"]["name"], "");
    assert_eq!(snapshot["fields"]["email"], "");
    assert_eq!(snapshot["fields"]["instrument"], "");
    assert_eq!(snapshot["fields"]["message"], "");
    assert_eq!(snapshot["fields"]["studentYear"], "freshman");
    assert_eq!(snapshot["fields"]["interestSubject"], "join");
}

#[test]
fn submit_with_blank_other_year_stays_idle_and_exits_1() {
    let config = dry_run_config();
    let config_path = config.path().to_str().expect("utf8 path");
    let output = eternotes(&[
        "submit",
        "--config",
        config_path,
        "--name",
        "Jo",
        "--email",
        "jo@example.com",
        "--year",
        "other",
        "--message",
        "Hello there friend",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let snapshot = stdout_json(&output);
    assert_eq!(snapshot["submission"], json!({ "state": "idle" }));
    assert_eq!(snapshot["errors"], json!({ "otherYear": "Please specify your year" }));
    assert_eq!(snapshot["fields"]["name"], "Jo");
}

#[test]
fn missing_config_file_exits_2() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.yaml");
    let output = eternotes(&[
        "submit",
        "--config",
        missing.to_str().expect("utf8 path"),
        "--name",
        "Jo",
        "--email",
        "jo@example.com",
        "--message",
        "Hello there friend",
    ]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
