//! # Nyx boot entry
//!
//! Freestanding image for a Multiboot2 loader. The loader enters `_start` in 32-bit protected
//! mode with no stack; the stub loads the top of [`BOOT_STACK`] into `esp` and calls
//! [`boot_main`], which proves it has control by writing to the text display and then halts.
//!
//! Built with the `kernel` feature for the `i686-nyx.json` target, linked by `linker.ld`.

#![no_std]
#![no_main]

extern crate rlibc;

use core::arch::{asm, global_asm};
use core::panic::PanicInfo;

use nyx::boot::{self, stack::BOOT_STACK_SIZE, BootHeader, BootStack};
use nyx::console::vga::{Attribute, VgaText};
use spin::Mutex;
use uart_16550::SerialPort;

#[used]
#[link_section = ".multiboot2"]
static MULTIBOOT2_HEADER: BootHeader = boot::MULTIBOOT2_HEADER;

static BOOT_STACK: BootStack = BootStack::new();

pub static SERIAL: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(0x3F8) });

/// The text display, once `boot_main` has claimed it.
pub static SCREEN: Mutex<Option<VgaText<'static>>> = Mutex::new(None);

#[macro_export]
macro_rules! serial_println {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut serial = $crate::SERIAL.lock();
        let _ = writeln!(serial, $($arg)*);
    }};
}

global_asm!(
    ".section .text._start, \"ax\"",
    ".global _start",
    "_start:",
    "    mov esp, offset {stack} + {size}",
    "    call {main}",
    "2:",
    "    cli",
    "    hlt",
    "    jmp 2b",
    stack = sym BOOT_STACK,
    size = const BOOT_STACK_SIZE,
    main = sym boot_main,
);

extern "C" fn boot_main() -> ! {
    // SAFETY: the display is identity mapped in protected mode and this is its only owner.
    let mut screen = unsafe { VgaText::hardware() };
    screen.set_attribute(Attribute::BOOT);
    screen.write_message(boot::BOOT_MESSAGE);
    *SCREEN.lock() = Some(screen);

    SERIAL.lock().init();
    serial_println!("nyx: multiboot2 header {:#010x?}", MULTIBOOT2_HEADER.words());
    serial_println!(
        "nyx: boot stack {:#x}..{:#x}",
        BOOT_STACK.bottom(),
        BOOT_STACK.top()
    );
    serial_println!(
        "nyx: {}",
        boot::BOOT_MESSAGE.to_str().unwrap_or("<boot message>")
    );

    halt()
}

/// Disables interrupts and halts for good.
fn halt() -> ! {
    loop {
        // SAFETY: `cli; hlt` only parks the processor.
        unsafe { asm!("cli", "hlt", options(nomem, nostack)) };
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // The panic may have happened with either lock held.
    if let Some(mut serial) = SERIAL.try_lock() {
        use core::fmt::Write;
        let _ = writeln!(serial, "PANIC : {} | {:?}", info.message(), info.location());
    }
    if let Some(mut screen) = SCREEN.try_lock() {
        if let Some(screen) = screen.as_mut() {
            screen.set_attribute(Attribute::PANIC);
            screen.write_row(0, b"KERNEL PANIC, see serial log");
        }
    }

    halt()
}
