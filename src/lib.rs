//! # Nyx
//!
//! The portable half of the Nyx core. Nothing in here assumes an operating system, a heap or
//! a particular display; the `kernel` and `nyx-shell` binaries pick the backends.
//!
//! ## Modules
//!
//! - [`boot`]: Multiboot2 header, boot stack and proof-of-life message
//! - [`console`]: the `ConsoleSink` / `InputSource` seams and their VGA and syscall backends
//! - [`shell`]: the prompt / read / dispatch loop and its command table

#![cfg_attr(not(test), no_std)]

pub mod boot;
pub mod console;
pub mod shell;
