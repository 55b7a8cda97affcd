//! VGA text-mode backend.
//!
//! The display is a linear array of `(character, attribute)` pairs, row-major, starting at
//! [`VGA_BUFFER_ADDRESS`]. Writes become visible immediately, so there is nothing to flush.

use core::convert::Infallible;
use core::ffi::CStr;
use core::fmt;
use core::ptr;

use super::ConsoleSink;

/// Physical address of the colour text buffer.
pub const VGA_BUFFER_ADDRESS: usize = 0xB8000;

pub const WIDTH: usize = 80;
pub const HEIGHT: usize = 25;

/// The 16 colours of the default VGA palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// Foreground in the low nibble, background in the high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Attribute(u8);

impl Attribute {
    pub const DEFAULT: Attribute = Attribute::new(Color::LightGray, Color::Black);
    pub const BOOT: Attribute = Attribute::new(Color::LightGreen, Color::Black);
    pub const PANIC: Attribute = Attribute::new(Color::White, Color::Red);

    pub const fn new(foreground: Color, background: Color) -> Self {
        Self((background as u8) << 4 | foreground as u8)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// One character cell as laid out in display memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct Cell {
    pub character: u8,
    pub attribute: Attribute,
}

impl Cell {
    pub const fn blank(attribute: Attribute) -> Self {
        Self {
            character: b' ',
            attribute,
        }
    }
}

/// A text console over a grid of [`Cell`]s.
pub struct VgaText<'a> {
    cells: &'a mut [Cell],
    width: usize,
    height: usize,
    row: usize,
    column: usize,
    attribute: Attribute,
}

impl<'a> VgaText<'a> {
    /// Wraps `cells` as a grid `width` cells wide. A trailing partial row is left untouched.
    pub fn new(cells: &'a mut [Cell], width: usize) -> Self {
        let width = width.max(1);
        let height = cells.len() / width;
        Self {
            cells,
            width,
            height,
            row: 0,
            column: 0,
            attribute: Attribute::DEFAULT,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(row, column)` of the next cell to be written.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.attribute = attribute;
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        if row >= self.height || column >= self.width {
            return None;
        }
        let index = row * self.width + column;
        // SAFETY: `index` is in bounds of a live, exclusively borrowed slice.
        Some(unsafe { ptr::read_volatile(&self.cells[index]) })
    }

    fn put(&mut self, index: usize, cell: Cell) {
        // Indexing keeps every store inside the grid.
        let slot = &mut self.cells[index];
        // SAFETY: `slot` is a valid, aligned reference into the grid.
        unsafe { ptr::write_volatile(slot, cell) };
    }

    /// Writes `message` at the origin, one cell per byte, stopping at its terminator or at the
    /// end of the first row. The cursor is not moved.
    pub fn write_message(&mut self, message: &CStr) {
        if self.height == 0 {
            return;
        }
        let attribute = self.attribute;
        for (column, &character) in message.to_bytes().iter().take(self.width).enumerate() {
            self.put(column, Cell { character, attribute });
        }
    }

    /// Fills `row` with `text` followed by blanks, using the current attribute.
    pub fn write_row(&mut self, row: usize, text: &[u8]) {
        if row >= self.height {
            return;
        }
        let attribute = self.attribute;
        let mut bytes = text.iter().copied().take_while(|&b| b != 0);
        for column in 0..self.width {
            let character = bytes.next().unwrap_or(b' ');
            self.put(row * self.width + column, Cell { character, attribute });
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        if self.height == 0 {
            return;
        }
        match byte {
            b'\n' => self.new_line(),
            b'\r' => self.column = 0,
            character => {
                let index = self.row * self.width + self.column;
                let attribute = self.attribute;
                self.put(index, Cell { character, attribute });
                self.column += 1;
                if self.column == self.width {
                    self.new_line();
                }
            }
        }
    }

    fn new_line(&mut self) {
        self.column = 0;
        if self.row + 1 < self.height {
            self.row += 1;
        } else {
            self.scroll_up();
        }
    }

    fn scroll_up(&mut self) {
        for index in self.width..self.width * self.height {
            // SAFETY: `index` is in bounds of the grid.
            let cell = unsafe { ptr::read_volatile(&self.cells[index]) };
            self.put(index - self.width, cell);
        }
        let blank = Cell::blank(self.attribute);
        let last = (self.height - 1) * self.width;
        for index in last..last + self.width {
            self.put(index, blank);
        }
    }

    /// Blanks every cell and homes the cursor.
    pub fn clear_screen(&mut self) {
        let blank = Cell::blank(self.attribute);
        for index in 0..self.width * self.height {
            self.put(index, blank);
        }
        self.row = 0;
        self.column = 0;
    }
}

impl VgaText<'static> {
    /// Takes over the hardware text buffer.
    ///
    /// # Safety
    ///
    /// `VGA_BUFFER_ADDRESS` must be identity mapped and no other `VgaText` may exist for it.
    pub unsafe fn hardware() -> Self {
        let cells = VGA_BUFFER_ADDRESS as *mut [Cell; WIDTH * HEIGHT];
        // SAFETY: upheld by the caller.
        Self::new(unsafe { &mut *cells }, WIDTH)
    }
}

impl ConsoleSink for VgaText<'_> {
    type Error = Infallible;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        for &byte in bytes {
            self.write_byte(byte);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.clear_screen();
        Ok(())
    }
}

impl fmt::Write for VgaText<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid<const N: usize>() -> [Cell; N] {
        [Cell::blank(Attribute::DEFAULT); N]
    }

    fn row_text(vga: &VgaText, row: usize) -> Vec<u8> {
        (0..vga.width()).map(|c| vga.cell(row, c).unwrap().character).collect()
    }

    #[test]
    fn attribute_packs_nibbles() {
        assert_eq!(Attribute::DEFAULT.bits(), 0x07);
        assert_eq!(Attribute::BOOT.bits(), 0x0A);
        assert_eq!(Attribute::PANIC.bits(), 0x4F);
        assert_eq!(core::mem::size_of::<Cell>(), 2);
    }

    #[test]
    fn message_stops_at_terminator() {
        let mut cells = grid::<{ WIDTH * HEIGHT }>();
        let mut vga = VgaText::new(&mut cells, WIDTH);
        vga.set_attribute(Attribute::BOOT);
        vga.write_message(c"hi");
        assert_eq!(
            vga.cell(0, 0),
            Some(Cell {
                character: b'h',
                attribute: Attribute::BOOT,
            })
        );
        assert_eq!(
            vga.cell(0, 1),
            Some(Cell {
                character: b'i',
                attribute: Attribute::BOOT,
            })
        );
        assert_eq!(vga.cell(0, 2), Some(Cell::blank(Attribute::DEFAULT)));
        assert_eq!(vga.cursor(), (0, 0));
    }

    #[test]
    fn message_is_cut_at_row_width() {
        let mut cells = grid::<8>();
        let mut vga = VgaText::new(&mut cells, 4);
        vga.write_message(c"abcdefgh");
        assert_eq!(row_text(&vga, 0), b"abcd");
        assert_eq!(row_text(&vga, 1), b"    ");
    }

    #[test]
    fn writes_wrap_and_scroll() {
        let mut cells = grid::<6>();
        let mut vga = VgaText::new(&mut cells, 3);
        vga.write_bytes(b"abcdef").unwrap();
        // "abc" scrolled off when "def" filled the last row.
        assert_eq!(row_text(&vga, 0), b"def");
        assert_eq!(row_text(&vga, 1), b"   ");
        assert_eq!(vga.cursor(), (1, 0));

        vga.write_bytes(b"x\ny").unwrap();
        assert_eq!(row_text(&vga, 0), b"x  ");
        assert_eq!(row_text(&vga, 1), b"y  ");
    }

    #[test]
    fn clear_blanks_and_homes() {
        let mut cells = grid::<6>();
        let mut vga = VgaText::new(&mut cells, 3);
        vga.write_bytes(b"ab\ncd").unwrap();
        ConsoleSink::clear(&mut vga).unwrap();
        assert_eq!(row_text(&vga, 0), b"   ");
        assert_eq!(row_text(&vga, 1), b"   ");
        assert_eq!(vga.cursor(), (0, 0));
    }

    #[test]
    fn write_row_pads_with_blanks() {
        let mut cells = grid::<8>();
        let mut vga = VgaText::new(&mut cells, 4);
        vga.set_attribute(Attribute::PANIC);
        vga.write_row(1, b"ok");
        vga.write_row(5, b"ignored");
        assert_eq!(row_text(&vga, 1), b"ok  ");
        assert_eq!(vga.cell(1, 3).unwrap().attribute, Attribute::PANIC);
    }

    #[test]
    fn message_on_grid_shorter_than_a_row_is_dropped() {
        let mut cells = grid::<3>();
        {
            let mut vga = VgaText::new(&mut cells, 10);
            assert_eq!(vga.height(), 0);
            vga.write_message(c"abcdef");
            vga.write_bytes(b"abcdef").unwrap();
        }
        assert_eq!(cells, grid::<3>());
    }

    #[test]
    fn never_writes_outside_the_grid() {
        let mut cells = grid::<7>();
        {
            let mut vga = VgaText::new(&mut cells, 3);
            vga.write_bytes(&[b'z'; 64]).unwrap();
        }
        assert_eq!(cells[6], Cell::blank(Attribute::DEFAULT));
    }
}
