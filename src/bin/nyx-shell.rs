//! Userspace front end: the Nyx shell on fd 0 / fd 1, spoken to through raw system calls.
//!
//! `NYX_PROMPT` overrides the prompt. The process exits with the shell's status, or 1 after
//! reporting an I/O failure on fd 2.

#[cfg(all(
    target_os = "linux",
    any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64"
    )
))]
fn main() {
    use core::fmt::Write;
    use std::os::unix::ffi::OsStringExt;

    use nyx::console::syscall::{self, Fd};
    use nyx::shell::{ExitStatus, Shell, ShellConfig, DEFAULT_PROMPT};

    let prompt = std::env::var_os("NYX_PROMPT").map(OsStringExt::into_vec);
    let config = ShellConfig {
        prompt: prompt.as_deref().unwrap_or(DEFAULT_PROMPT),
        ..ShellConfig::default()
    };

    let mut shell = Shell::new(Fd::STDIN, Fd::STDOUT, config);
    let status = match shell.run() {
        Ok(status) => status,
        Err(err) => {
            let mut stderr = Fd::STDERR;
            let _ = writeln!(stderr, "nyx-shell: {}", err);
            ExitStatus::FAILURE
        }
    };

    syscall::exit(status.code())
}

#[cfg(not(all(
    target_os = "linux",
    any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64"
    )
)))]
fn main() {
    eprintln!(
        "nyx-shell: raw system calls are only wired up for Linux on x86_64, x86 and aarch64"
    );
    std::process::exit(1);
}
