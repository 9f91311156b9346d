//! # Board Frames
//!
//! The engine publishes the whole 3×3 board as a single 32-bit word.
//! Each cell takes two bits:
//!
//! ```text
//! bit  31 .. 18 | 17 16 | 15 14 | 13 12 | 11 10 | 9 8 | 7 6 | 5 4 | 3 2 | 1 0
//!      unused   | (2,2) | (2,1) | (2,0) | (1,2) |(1,1)|(1,0)|(0,2)|(0,1)|(0,0)
//! ```
//!
//! Cell `(row, col)` lives at bit offset `row * 6 + col * 2`.
//! The frame arrives as 4 little-endian bytes on the device stream.

/// Number of bytes a board frame occupies on the device stream.
pub const FRAME_LEN: usize = 4;

/// Board side length.
pub const SIZE: usize = 3;

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    X,
    O,
    /// Value 3 is reserved by the engine.
    Unknown,
}

impl Cell {
    /// Maps a 2-bit field value to a cell. Only the low two bits are looked at.
    pub fn from_bits(bits: u32) -> Self {
        match bits & 0x3 {
            0 => Cell::Empty,
            1 => Cell::X,
            2 => Cell::O,
            _ => Cell::Unknown,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
            Cell::Unknown => '?',
        }
    }
}

/// A raw packed frame as received from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame(pub u32);

impl BoardFrame {
    pub fn from_le_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// Bit offset of the 2-bit field for `(row, col)`.
    pub fn offset(row: usize, col: usize) -> u32 {
        (row * 6 + col * 2) as u32
    }

    pub fn cell(self, row: usize, col: usize) -> Cell {
        Cell::from_bits(self.0 >> Self::offset(row, col))
    }

    pub fn decode(self) -> Board {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.cell(row, col);
            }
        }
        Board { cells }
    }
}

/// A decoded board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; SIZE]> {
        self.cells.iter()
    }
}
