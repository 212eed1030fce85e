use assert_cmd::Command;

const UNREACHABLE: &str = "http://127.0.0.1:9/api";

fn biblioteca() -> Command {
    let mut cmd = Command::cargo_bin("biblioteca").unwrap();
    cmd.env_remove("RUST_LOG")
        .env("BIBLIOTECA_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"));
    cmd
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_commands() {
    let output = biblioteca().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for command in ["dashboard", "list", "create", "delete", "fields"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn fields_prints_schema_without_backend() {
    let output = biblioteca()
        .args(["--base-url", UNREACHABLE, "fields", "books"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("titulo"));
    assert!(stdout.contains("numeroPaginas"));
    assert!(stdout.contains("filters: genre, publisher, author, isbn"));
}

#[test]
fn declined_delete_makes_no_call() {
    let output = biblioteca()
        .args(["--base-url", UNREACHABLE, "delete", "books", "1"])
        .write_stdin("n\n")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Deletion cancelled"));
}

#[test]
fn unreachable_backend_fails_the_command() {
    biblioteca()
        .args(["--base-url", UNREACHABLE, "list", "dvds"])
        .assert()
        .failure();
}

#[test]
fn invalid_create_is_rejected_before_any_request() {
    let output = biblioteca()
        .args([
            "--base-url",
            UNREACHABLE,
            "create",
            "magazines",
            "--set",
            "title=Byte",
            "--set",
            "edition_number=0",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("author is required"));
    assert!(stderr.contains("edition must be at least 1"));
    assert!(!stderr.contains("connection error"));
}
