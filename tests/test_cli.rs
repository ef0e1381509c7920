use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;

fn write_source(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tyc-{}-{}.tyc", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

fn tyc() -> Command {
    let mut command = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    command.env("NO_COLOR", "1").env_remove("RUST_LOG");
    command
}

#[test]
fn test_accepts_program() {
    let file = write_source("accept", "struct A { int x; };\nvoid main() { A a = {1}; }\n");

    tyc().arg(&file).assert().success().stdout("success\n");
    fs::remove_file(file).unwrap();
}

#[test]
fn test_rejects_program() {
    let file = write_source("reject", "void f() { if (x) ; }");

    let output = tyc().arg(&file).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1:19"), "stderr: {stderr}");
    fs::remove_file(file).unwrap();
}

#[test]
fn test_prints_tokens() {
    let file = write_source("tokens", "1..3 0x1");

    tyc()
        .arg(&file)
        .arg("--tokens")
        .assert()
        .success()
        .stdout("FLOAT_LIT,1.,FLOAT_LIT,.3,INT_LIT,0,ID,x1,EOF\n");
    fs::remove_file(file).unwrap();
}

#[test]
fn test_token_error_exits_nonzero() {
    let file = write_source("token-error", "a = \"abc");

    let output = tyc().arg(&file).arg("--tokens").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unclosed String: abc"), "stderr: {stderr}");
    fs::remove_file(file).unwrap();
}

#[test]
fn test_reads_stdin_and_prints_ast() {
    let output = tyc()
        .args(["-", "--ast"])
        .write_stdin("int f() { return 1; }")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RETURN"), "stdout: {stdout}");
    assert!(stdout.ends_with("success\n"), "stdout: {stdout}");
}

#[test]
fn test_missing_file_fails() {
    tyc().arg("/nonexistent/input.tyc").assert().failure();
}

#[test]
fn test_deep_nesting_is_a_diagnostic() {
    let depth = 5000;
    let file = write_source(
        "deep",
        &format!("void f() {{ x = {}1{}; }}", "(".repeat(depth), ")".repeat(depth)),
    );

    let output = tyc().arg(&file).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nesting exceeds"), "stderr: {stderr}");
    fs::remove_file(file).unwrap();
}
