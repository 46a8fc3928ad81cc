use core::fmt::{self, Write};

use heapless::{consts::U16, String};

#[cfg(feature = "embedded-graphics")]
use embedded_graphics::{
    drawable::Pixel,
    fonts::{Font6x8, Text},
    pixelcolor::BinaryColor,
    prelude::*,
    style::TextStyle,
};

use crate::glyph::Glyph;

pub const ROWS: usize = 2;
pub const COLUMNS: usize = 16;

/// Pixel size of a single character cell when drawn
#[cfg(feature = "embedded-graphics")]
pub const CELL_WIDTH: i32 = 8;
#[cfg(feature = "embedded-graphics")]
pub const CELL_HEIGHT: i32 = 16;

/// Contents of the two-row character display
///
/// Writes outside of the grid are clipped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Frame([[Glyph; COLUMNS]; ROWS]);

impl Frame {
    pub fn blank() -> Self {
        Self([[Glyph::Blank; COLUMNS]; ROWS])
    }

    pub fn glyph(&self, row: usize, col: usize) -> Option<Glyph> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Glyph; COLUMNS]> {
        self.0.iter()
    }

    pub fn put(&mut self, row: usize, col: usize, glyph: Glyph) {
        if let Some(slot) = self.0.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = glyph;
        }
    }

    pub fn write_str(&mut self, row: usize, col: usize, text: &str) {
        text.bytes()
            .enumerate()
            .for_each(|(n, c)| self.put(row, col + n, Glyph::Text(c)));
    }

    /// Write `value` right-aligned in a field of `width` columns filled with `pad`
    ///
    /// Numbers wider than the field are written in full.
    pub fn write_number(&mut self, row: usize, col: usize, value: u32, width: usize, pad: u8) {
        let mut digits: String<U16> = String::new();
        // u32 never exceeds ten digits
        let _ = write!(digits, "{}", value);
        let padding = width.saturating_sub(digits.len());
        for n in 0..padding {
            self.put(row, col + n, Glyph::Text(pad));
        }
        self.write_str(row, col + padding, &digits);
    }

    /// Character codes row by row, as a character display expects them
    pub fn codes(&self) -> [[u8; COLUMNS]; ROWS] {
        let mut codes = [[b' '; COLUMNS]; ROWS];
        codes
            .iter_mut()
            .flatten()
            .zip(self.0.iter().flatten())
            .for_each(|(code, glyph)| *code = glyph.code());
        codes
    }

    /// Draw onto a pixel display, each character taking an 8x16 cell
    #[cfg(feature = "embedded-graphics")]
    pub fn draw<D: DrawTarget<BinaryColor>>(&self, target: &mut D) -> Result<(), D::Error> {
        let style = TextStyle::new(Font6x8, BinaryColor::On);
        for (row, glyphs) in self.0.iter().enumerate() {
            for (col, glyph) in glyphs.iter().enumerate() {
                let origin = Point::new(col as i32 * CELL_WIDTH, row as i32 * CELL_HEIGHT);
                if let Some(bitmap) = glyph.bitmap() {
                    draw_sprite(target, origin, bitmap)?;
                } else if let Glyph::Text(c) = *glyph {
                    let mut buf = [0u8; 4];
                    let text = (c as char).encode_utf8(&mut buf);
                    Text::new(text, origin + Point::new(1, 4))
                        .into_styled(style)
                        .draw(target)?;
                }
            }
        }
        Ok(())
    }
}

/// Sprites are stretched to twice their height to fill a cell
#[cfg(feature = "embedded-graphics")]
fn draw_sprite<D: DrawTarget<BinaryColor>>(
    target: &mut D,
    origin: Point,
    bitmap: &[u8; 8],
) -> Result<(), D::Error> {
    for (y, line) in bitmap.iter().enumerate() {
        for x in 0..5 {
            if line & (0b1_0000 >> x) != 0 {
                for dy in 0..2 {
                    let at = origin + Point::new(1 + x, 2 * y as i32 + dy);
                    Pixel(at, BinaryColor::On).draw(target)?;
                }
            }
        }
    }
    Ok(())
}

impl Default for Frame {
    fn default() -> Self {
        Self::blank()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, glyphs) in self.0.iter().enumerate() {
            if n > 0 {
                f.write_char('\n')?;
            }
            write!(f, "|")?;
            for glyph in glyphs.iter() {
                f.write_char(glyph.to_char())?;
            }
            write!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod frame_test {
    use super::*;
    use crate::assert_rows;
    use crate::glyph::Pose;

    #[test]
    fn put_clips_outside_grid() {
        let mut frame = Frame::blank();
        frame.put(0, COLUMNS, Glyph::Obstacle);
        frame.put(ROWS, 0, Glyph::Obstacle);
        assert_eq!(frame, Frame::blank());
        frame.put(1, 15, Glyph::Obstacle);
        assert_eq!(frame.glyph(1, 15), Some(Glyph::Obstacle));
        assert_eq!(frame.glyph(2, 0), None);
    }

    #[test]
    fn write_str_clips() {
        let mut frame = Frame::blank();
        frame.write_str(0, 12, "HELLO");
        assert_rows!(frame, "            HELL", "                ");
    }

    #[test]
    fn write_number_pads() {
        let mut frame = Frame::blank();
        frame.write_number(0, 0, 7, 3, b'0');
        frame.write_number(0, 5, 42, 4, b' ');
        frame.write_number(1, 0, 123_456, 3, b' ');
        assert_rows!(frame, "007    42       ", "123456          ");
    }

    #[test]
    fn codes_follow_glyphs() {
        let mut frame = Frame::blank();
        frame.put(1, 0, Glyph::Runner(Pose::LeftStride));
        frame.put(1, 3, Glyph::Obstacle);
        frame.write_str(0, 0, "A");
        let codes = frame.codes();
        assert_eq!(codes[0][0], b'A');
        assert_eq!(codes[1][0], 0);
        assert_eq!(codes[1][3], 3);
        assert_eq!(codes[1][4], b' ');
    }

    #[cfg(feature = "embedded-graphics")]
    mod draw {
        use super::*;
        use core::convert::Infallible;

        struct Canvas {
            lit: usize,
            out_of_bounds: usize,
        }

        impl DrawTarget<BinaryColor> for Canvas {
            type Error = Infallible;

            fn draw_pixel(&mut self, Pixel(at, color): Pixel<BinaryColor>) -> Result<(), Self::Error> {
                if color == BinaryColor::On {
                    self.lit += 1;
                }
                if at.x < 0 || at.y < 0 || at.x >= 128 || at.y >= 32 {
                    self.out_of_bounds += 1;
                }
                Ok(())
            }

            fn size(&self) -> Size {
                Size::new(128, 32)
            }
        }

        #[test]
        fn sprite_pixels_doubled_vertically() {
            let mut frame = Frame::blank();
            frame.put(1, 15, Glyph::Obstacle);
            let mut canvas = Canvas {
                lit: 0,
                out_of_bounds: 0,
            };
            frame.draw(&mut canvas).unwrap();

            let set_bits: u32 = Glyph::Obstacle
                .bitmap()
                .unwrap()
                .iter()
                .map(|row| row.count_ones())
                .sum();
            assert_eq!(canvas.lit, 2 * set_bits as usize);
            assert_eq!(canvas.out_of_bounds, 0);
        }

        #[test]
        fn blank_frame_draws_nothing() {
            let mut canvas = Canvas {
                lit: 0,
                out_of_bounds: 0,
            };
            Frame::blank().draw(&mut canvas).unwrap();
            assert_eq!(canvas.lit, 0);
        }
    }
}
