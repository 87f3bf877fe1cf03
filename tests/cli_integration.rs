//! Integration tests that run the CLI binary.

/// Unroutable backend: nothing listens on the discard port, so requests fail fast.
const DEAD_BACKEND: &str = "http://127.0.0.1:9/api";

fn bin() -> std::process::Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_codepal"));
    cmd.env("CODEPAL_API_URL", DEAD_BACKEND);
    cmd.env("CODEPAL_TIMEOUT_SECS", "5");
    cmd
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("codepal"));
    assert!(stdout.contains("languages"));
}

#[test]
fn cli_version_succeeds() {
    let output = bin()
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("codepal"));
}

#[test]
fn cli_languages_falls_back_to_builtin_list_offline() {
    let output = bin()
        .arg("languages")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("python"));
    assert!(stdout.contains("Java"));
}

#[test]
fn cli_kb_ask_fails_without_backend() {
    let output = bin()
        .args(["kb", "ask", "what is this?"])
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
}

#[test]
fn cli_kb_list_fails_without_backend() {
    let output = bin()
        .args(["kb", "list"])
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
}

#[test]
fn cli_rejects_invalid_api_url() {
    let output = bin()
        .env("CODEPAL_API_URL", "ftp://not-http")
        .args(["-p", "hello"])
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("CODEPAL_API_URL"),
        "expected config error, got: {}",
        stderr
    );
}

#[test]
fn cli_empty_prompt_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin()
        .args(["-p", "   "])
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty prompt"), "got: {}", stderr);
}
