//! # Console
//!
//! The shell only ever talks to a [`ConsoleSink`] for output and an [`InputSource`] for input.
//! Two backends exist:
//!
//! | Backend          | Output                        | Input          |
//! |------------------|-------------------------------|----------------|
//! | [`vga::VgaText`] | text-mode cells at `0xB8000`  | none           |
//! | [`syscall::Fd`]  | `write(fd, ..)`               | `read(fd, ..)` |
//!
//! A sink shared between several contexts goes behind a [`spin::Mutex`]; `&Mutex<S>` is itself
//! a sink and takes the lock for every write.

pub mod vga;

#[cfg(all(
    target_os = "linux",
    any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64"
    )
))]
pub mod syscall;

use spin::Mutex;

/// `ESC[2J` (erase display) followed by `ESC[H` (cursor home).
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J\x1b[H";

/// A place text output goes.
pub trait ConsoleSink {
    type Error;

    /// Writes every byte of `bytes`, in order.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Clears the visible area and moves the cursor to the origin.
    fn clear(&mut self) -> Result<(), Self::Error> {
        self.write_bytes(CLEAR_SCREEN)
    }
}

/// A blocking source of raw input bytes.
pub trait InputSource {
    type Error;

    /// Reads at most `buf.len()` bytes. `Ok(0)` means the source is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<S: ConsoleSink + ?Sized> ConsoleSink for &mut S {
    type Error = S::Error;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(bytes)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        (**self).clear()
    }
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    type Error = S::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }
}

impl<S: ConsoleSink> ConsoleSink for &Mutex<S> {
    type Error = S::Error;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.lock().write_bytes(bytes)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.lock().clear()
    }
}
