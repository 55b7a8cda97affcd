#![cfg(all(
    target_os = "linux",
    any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64"
    )
))]

use std::fs::File;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn spawn(input: &[u8], prompt: Option<&str>, stdout: Stdio) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_nyx-shell"));
    command
        .stdin(Stdio::piped())
        .stdout(stdout)
        .stderr(Stdio::piped())
        .env_remove("NYX_PROMPT");
    if let Some(prompt) = prompt {
        command.env("NYX_PROMPT", prompt);
    }

    let mut child = command.spawn().unwrap();
    let mut stdin = child.stdin.take().unwrap();
    // The shell may stop reading early, so a broken pipe is fine.
    let _ = stdin.write_all(input);
    drop(stdin);
    child.wait_with_output().unwrap()
}

fn session(input: &[u8]) -> Output {
    spawn(input, None, Stdio::piped())
}

#[test]
fn echo_then_exit() {
    let output = session(b"echo hello world\nexit\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"nyx> hello world\nnyx> ");
    assert!(output.stderr.is_empty());
}

#[test]
fn exit_ignores_the_rest() {
    let output = session(b"exit\necho too late\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"nyx> ");
}

#[test]
fn clear_and_unknown_commands() {
    let output = session(b"cls\nls -la\nclear\nexit\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        output.stdout,
        b"nyx> \x1b[2J\x1b[Hnyx> nyx> \x1b[2J\x1b[Hnyx> "
    );
}

#[test]
fn end_of_input_exits_cleanly() {
    let output = session(b"echo bye\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(output.stdout, b"nyx> bye\nnyx> ");
}

#[test]
fn prompt_comes_from_environment() {
    let output = spawn(b"echo x\n", Some("# "), Stdio::piped());
    assert_eq!(output.stdout, b"# x\n# ");
}

#[test]
fn write_failure_exits_with_status_one() {
    // A descriptor opened read-only refuses writes with EBADF.
    let read_only = File::open(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml")).unwrap();
    let output = spawn(b"exit\n", None, Stdio::from(read_only));
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        output.stderr,
        b"nyx-shell: failed to write output: EBADF (os error 9)\n"
    );
}
