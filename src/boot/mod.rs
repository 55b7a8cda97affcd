//! # Boot
//!
//! Everything the boot entry stub needs before any Rust code can run: the header the loader
//! scans for, the statically reserved stack and the message written to prove we got control.
//!
//! The entry point itself (`_start`) lives in the `kernel` binary since it only makes sense
//! on the freestanding target.

pub mod header;
pub mod stack;

use core::ffi::CStr;

pub use header::BootHeader;
pub use stack::BootStack;

/// Written at the origin of the text display once the stack is up.
pub const BOOT_MESSAGE: &CStr = c"Nyx OS: booted, stack ready, halting.";

/// The header placed in `.multiboot2` by the kernel image.
pub const MULTIBOOT2_HEADER: BootHeader = BootHeader::new(header::MAGIC, header::ARCH_I386);

const _: () = assert!(MULTIBOOT2_HEADER.is_valid());
