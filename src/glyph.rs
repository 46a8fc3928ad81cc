//! Characters a frame is made of.
//!
//! Sprites are 5x8 bitmaps in the layout of HD44780 CGRAM: one byte per row,
//! the five low bits are the pixels with bit 4 leftmost. A character display
//! uploads [`CGRAM`] once and then refers to sprites by their slot.

use crate::world::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pose {
    LeftStride,
    RightStride,
    Airborne,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    /// Plain ASCII character
    Text(u8),
    Runner(Pose),
    Obstacle,
}

const RUNNER_LEFT: [u8; 8] = [
    0b00111, 0b00101, 0b00111, 0b10110, 0b11111, 0b11110, 0b01110, 0b00110,
];

const RUNNER_RIGHT: [u8; 8] = [
    0b00111, 0b00101, 0b00111, 0b10110, 0b11111, 0b11110, 0b01110, 0b01000,
];

const RUNNER_AIRBORNE: [u8; 8] = [
    0b00111, 0b00101, 0b00111, 0b10110, 0b11111, 0b11110, 0b01010, 0b00000,
];

const OBSTACLE: [u8; 8] = [
    0b00100, 0b00101, 0b00101, 0b10110, 0b10100, 0b01100, 0b00100, 0b00100,
];

/// Custom character memory, indexed by slot
pub const CGRAM: [[u8; 8]; 4] = [RUNNER_LEFT, RUNNER_RIGHT, RUNNER_AIRBORNE, OBSTACLE];

impl Glyph {
    /// Slot in [`CGRAM`] for sprites
    pub fn slot(&self) -> Option<u8> {
        match *self {
            Glyph::Runner(Pose::LeftStride) => Some(0),
            Glyph::Runner(Pose::RightStride) => Some(1),
            Glyph::Runner(Pose::Airborne) => Some(2),
            Glyph::Obstacle => Some(3),
            Glyph::Blank | Glyph::Text(_) => None,
        }
    }

    pub fn bitmap(&self) -> Option<&'static [u8; 8]> {
        self.slot().map(|slot| &CGRAM[slot as usize])
    }

    /// Character code as sent to a character display
    pub fn code(&self) -> u8 {
        match *self {
            Glyph::Blank => b' ',
            Glyph::Text(c) => c,
            sprite => sprite.slot().unwrap_or(b' '),
        }
    }

    /// Printable stand-in, used for logs and tests
    pub fn to_char(&self) -> char {
        match *self {
            Glyph::Blank => ' ',
            Glyph::Text(c) => c as char,
            Glyph::Runner(Pose::LeftStride) => 'd',
            Glyph::Runner(Pose::RightStride) => 'b',
            Glyph::Runner(Pose::Airborne) => '^',
            Glyph::Obstacle => '#',
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::Blank
    }
}

impl From<Cell> for Glyph {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Glyph::Blank,
            Cell::Obstacle => Glyph::Obstacle,
        }
    }
}
