//! # Raw system call backend
//!
//! Userspace console over bare Linux `read`/`write` system calls, issued with inline assembly.
//! There is no buffering layer and no line editing: whatever the terminal driver hands to
//! `read` is what the shell sees.
//!
//! ## File Descriptors
//!
//! | FD | Stream | Use                       |
//! |----|--------|---------------------------|
//! | 0  | stdin  | shell input               |
//! | 1  | stdout | prompt and command output |
//! | 2  | stderr | fatal diagnostics         |

use core::fmt;

use super::{ConsoleSink, InputSource};

/// An error number returned by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Errno(i32);

impl Errno {
    pub const EINTR: Errno = Errno(4);
    pub const EIO: Errno = Errno(5);
    pub const EBADF: Errno = Errno(9);
    pub const EAGAIN: Errno = Errno(11);
    pub const EFAULT: Errno = Errno(14);
    pub const EINVAL: Errno = Errno(22);
    pub const EPIPE: Errno = Errno(32);

    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::EINTR => "EINTR",
            Self::EIO => "EIO",
            Self::EBADF => "EBADF",
            Self::EAGAIN => "EAGAIN",
            Self::EFAULT => "EFAULT",
            Self::EINVAL => "EINVAL",
            Self::EPIPE => "EPIPE",
            _ => return None,
        })
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (os error {})", name, self.0),
            None => write!(f, "os error {}", self.0),
        }
    }
}

/// A raw file descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fd(i32);

impl Fd {
    pub const STDIN: Fd = Fd(0);
    pub const STDOUT: Fd = Fd(1);
    pub const STDERR: Fd = Fd(2);

    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }
}

#[cfg(target_arch = "x86_64")]
mod arch {
    use core::arch::asm;

    pub const READ: usize = 0;
    pub const WRITE: usize = 1;
    pub const EXIT_GROUP: usize = 231;

    pub unsafe fn syscall3(number: usize, a0: usize, a1: usize, a2: usize) -> isize {
        let ret: isize;
        // SAFETY: upheld by the caller; `syscall` clobbers rcx and r11.
        unsafe {
            asm!(
                "syscall",
                inlateout("rax") number as isize => ret,
                in("rdi") a0,
                in("rsi") a1,
                in("rdx") a2,
                lateout("rcx") _,
                lateout("r11") _,
                options(nostack),
            );
        }
        ret
    }

    pub fn exit_group(status: usize) -> ! {
        // SAFETY: `exit_group` takes no pointers and never returns.
        unsafe {
            asm!(
                "syscall",
                in("rax") EXIT_GROUP,
                in("rdi") status,
                options(noreturn, nostack),
            );
        }
    }
}

#[cfg(target_arch = "aarch64")]
mod arch {
    use core::arch::asm;

    pub const READ: usize = 63;
    pub const WRITE: usize = 64;
    pub const EXIT_GROUP: usize = 94;

    pub unsafe fn syscall3(number: usize, a0: usize, a1: usize, a2: usize) -> isize {
        let ret: isize;
        // SAFETY: upheld by the caller.
        unsafe {
            asm!(
                "svc 0",
                in("x8") number,
                inlateout("x0") a0 as isize => ret,
                in("x1") a1,
                in("x2") a2,
                options(nostack),
            );
        }
        ret
    }

    pub fn exit_group(status: usize) -> ! {
        // SAFETY: `exit_group` takes no pointers and never returns.
        unsafe {
            asm!(
                "svc 0",
                in("x8") EXIT_GROUP,
                in("x0") status,
                options(noreturn, nostack),
            );
        }
    }
}

#[cfg(target_arch = "x86")]
mod arch {
    use core::arch::asm;

    pub const READ: usize = 3;
    pub const WRITE: usize = 4;
    pub const EXIT_GROUP: usize = 252;

    pub unsafe fn syscall3(number: usize, a0: usize, a1: usize, a2: usize) -> isize {
        let ret: isize;
        // SAFETY: upheld by the caller; `int 0x80` preserves every register but eax.
        unsafe {
            asm!(
                "int 0x80",
                inlateout("eax") number as isize => ret,
                in("ebx") a0,
                in("ecx") a1,
                in("edx") a2,
                options(nostack),
            );
        }
        ret
    }

    pub fn exit_group(status: usize) -> ! {
        // SAFETY: `exit_group` takes no pointers and never returns.
        unsafe {
            asm!(
                "int 0x80",
                in("eax") EXIT_GROUP,
                in("ebx") status,
                options(noreturn, nostack),
            );
        }
    }
}

fn check(ret: isize) -> Result<usize, Errno> {
    if ret < 0 {
        Err(Errno(ret.unsigned_abs() as i32))
    } else {
        Ok(ret as usize)
    }
}

/// `read(fd, buf, buf.len())`.
pub fn read(fd: Fd, buf: &mut [u8]) -> Result<usize, Errno> {
    // SAFETY: the kernel writes at most `buf.len()` bytes into `buf`.
    let ret = unsafe {
        arch::syscall3(
            arch::READ,
            fd.0 as usize,
            buf.as_mut_ptr() as usize,
            buf.len(),
        )
    };
    check(ret)
}

/// `write(fd, buf, buf.len())`. May write fewer bytes than asked.
pub fn write(fd: Fd, buf: &[u8]) -> Result<usize, Errno> {
    // SAFETY: the kernel reads at most `buf.len()` bytes from `buf`.
    let ret = unsafe {
        arch::syscall3(
            arch::WRITE,
            fd.0 as usize,
            buf.as_ptr() as usize,
            buf.len(),
        )
    };
    check(ret)
}

/// Terminates every thread of the process with `status`.
pub fn exit(status: u8) -> ! {
    arch::exit_group(status as usize)
}

impl InputSource for Fd {
    type Error = Errno;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Errno> {
        read(*self, buf)
    }
}

impl ConsoleSink for Fd {
    type Error = Errno;

    fn write_bytes(&mut self, mut bytes: &[u8]) -> Result<(), Errno> {
        while !bytes.is_empty() {
            match write(*self, bytes)? {
                0 => return Err(Errno::EIO),
                n => bytes = &bytes[n..],
            }
        }
        Ok(())
    }
}

impl fmt::Write for Fd {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
