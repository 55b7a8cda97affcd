//! Fixed-capacity line buffer.

use super::pattern;
use crate::console::InputSource;

/// Maximum number of bytes a line may occupy, terminator included.
pub const INPUT_CAPACITY: usize = 128;

/// Frames raw reads into lines without ever growing.
///
/// A single read may return part of a line or several lines at once; bytes past the current
/// line stay in the buffer for the next call. A line that does not fit is cut at
/// [`INPUT_CAPACITY`] and the rest of it, up to and including its newline, is thrown away.
pub struct InputBuffer {
    bytes: [u8; INPUT_CAPACITY],
    filled: usize,
    line: usize,
    discarding: bool,
}

impl InputBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; INPUT_CAPACITY],
            filled: 0,
            line: 0,
            discarding: false,
        }
    }

    /// The line produced by the last successful [`read_line`](Self::read_line), terminator
    /// included when there was one.
    pub fn line(&self) -> &[u8] {
        &self.bytes[..self.line]
    }

    /// The current line without its terminator.
    pub fn command(&self) -> &[u8] {
        pattern::strip_terminator(self.line())
    }

    fn newline_in(&self, start: usize) -> Option<usize> {
        self.bytes[start..self.filled]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| start + i)
    }

    /// Forgets the first `count` buffered bytes.
    fn consume(&mut self, count: usize) {
        self.bytes.copy_within(count..self.filled, 0);
        self.filled -= count;
    }

    /// Blocks until a full line is buffered.
    ///
    /// Returns `Ok(false)` once `source` is exhausted and nothing is left to hand out. A final
    /// line without a newline is still returned.
    pub fn read_line<S: InputSource>(&mut self, source: &mut S) -> Result<bool, S::Error> {
        let previous = core::mem::take(&mut self.line);
        self.consume(previous);

        loop {
            if self.discarding {
                match self.newline_in(0) {
                    Some(end) => {
                        self.consume(end + 1);
                        self.discarding = false;
                    }
                    None => self.filled = 0,
                }
            }

            if !self.discarding {
                if let Some(end) = self.newline_in(0) {
                    self.line = end + 1;
                    return Ok(true);
                }
                if self.filled == INPUT_CAPACITY {
                    self.line = INPUT_CAPACITY;
                    self.discarding = true;
                    return Ok(true);
                }
            }

            let free = &mut self.bytes[self.filled..];
            let n = source.read(free)?.min(free.len());
            if n == 0 {
                self.discarding = false;
                if self.filled == 0 {
                    return Ok(false);
                }
                self.line = self.filled;
                return Ok(true);
            }
            self.filled += n;
        }
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
