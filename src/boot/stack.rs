//! Statically reserved boot stack.

use core::cell::UnsafeCell;

/// Size of the boot stack in bytes.
pub const BOOT_STACK_SIZE: usize = 16 * 1024;

/// A region that only ever serves as the stack of the boot processor.
///
/// Stacks grow downward, so the entry stub loads the stack pointer with [`BootStack::top`]
/// before anything else touches memory.
#[repr(C, align(16))]
pub struct BootStack(UnsafeCell<[u8; BOOT_STACK_SIZE]>);

// SAFETY:
//  The region is only accessed through the stack pointer of the single boot context.
unsafe impl Sync for BootStack {}

impl BootStack {
    pub const fn new() -> Self {
        Self(UnsafeCell::new([0; BOOT_STACK_SIZE]))
    }

    /// Lowest address of the region.
    pub fn bottom(&self) -> usize {
        self.0.get() as usize
    }

    /// One past the highest address of the region, where the stack pointer starts.
    pub fn top(&self) -> usize {
        self.bottom() + BOOT_STACK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_is_aligned_end_of_region() {
        let stack = Box::new(BootStack::new());
        assert!(BOOT_STACK_SIZE >= 4096);
        assert_eq!(stack.top() - stack.bottom(), BOOT_STACK_SIZE);
        assert_eq!(stack.top() % 16, 0);
    }
}
