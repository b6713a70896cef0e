//! Variable width 5-row bitmap font
//!
//! Each glyph row is a bitmask where the most significant of the `width`
//! low bits is the leftmost column.

use crate::{PixelSink, color::Rgb};

/// Height of every glyph in rows
pub const GLYPH_HEIGHT: i32 = 5;

/// Advance used for characters without a glyph
pub const FALLBACK_ADVANCE: i32 = 4;

/// Single bitmap glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub width: u8,
    pub rows: [u8; 5],
}

impl Glyph {
    const fn new(width: u8, rows: [u8; 5]) -> Self {
        Self { width, rows }
    }

    /// Returns if the pixel at `col`, `row` is set
    pub const fn is_set(&self, col: u8, row: usize) -> bool {
        if col >= self.width || row >= self.rows.len() {
            return false;
        }
        (self.rows[row] >> (self.width - 1 - col)) & 1 == 1
    }

    /// Horizontal advance including the one column gap
    pub const fn advance(&self) -> i32 {
        self.width as i32 + 1
    }
}

/// Look up the glyph for a character (case-insensitive)
pub const fn glyph(c: char) -> Option<Glyph> {
    let g = match c.to_ascii_uppercase() {
        'A' => Glyph::new(4, [0b0110, 0b1001, 0b1111, 0b1001, 0b1001]),
        'B' => Glyph::new(4, [0b1110, 0b1001, 0b1110, 0b1001, 0b1110]),
        'C' => Glyph::new(4, [0b0111, 0b1000, 0b1000, 0b1000, 0b0111]),
        'D' => Glyph::new(4, [0b1110, 0b1001, 0b1001, 0b1001, 0b1110]),
        'E' => Glyph::new(4, [0b1111, 0b1000, 0b1110, 0b1000, 0b1111]),
        'F' => Glyph::new(4, [0b1111, 0b1000, 0b1110, 0b1000, 0b1000]),
        'G' => Glyph::new(4, [0b0111, 0b1000, 0b1011, 0b1001, 0b0111]),
        'H' => Glyph::new(4, [0b1001, 0b1001, 0b1111, 0b1001, 0b1001]),
        'I' => Glyph::new(3, [0b111, 0b010, 0b010, 0b010, 0b111]),
        'J' => Glyph::new(4, [0b0011, 0b0001, 0b0001, 0b1001, 0b0110]),
        'K' => Glyph::new(4, [0b1001, 0b1010, 0b1100, 0b1010, 0b1001]),
        'L' => Glyph::new(4, [0b1000, 0b1000, 0b1000, 0b1000, 0b1111]),
        'M' => Glyph::new(5, [0b10001, 0b11011, 0b10101, 0b10001, 0b10001]),
        'N' => Glyph::new(4, [0b1001, 0b1101, 0b1011, 0b1001, 0b1001]),
        'O' => Glyph::new(4, [0b0110, 0b1001, 0b1001, 0b1001, 0b0110]),
        'P' => Glyph::new(4, [0b1110, 0b1001, 0b1110, 0b1000, 0b1000]),
        'Q' => Glyph::new(4, [0b0110, 0b1001, 0b1001, 0b1011, 0b0111]),
        'R' => Glyph::new(4, [0b1110, 0b1001, 0b1110, 0b1010, 0b1001]),
        'S' => Glyph::new(4, [0b0111, 0b1000, 0b0110, 0b0001, 0b1110]),
        'T' => Glyph::new(5, [0b11111, 0b00100, 0b00100, 0b00100, 0b00100]),
        'U' => Glyph::new(4, [0b1001, 0b1001, 0b1001, 0b1001, 0b0110]),
        'V' => Glyph::new(5, [0b10001, 0b10001, 0b01010, 0b01010, 0b00100]),
        'W' => Glyph::new(5, [0b10001, 0b10001, 0b10101, 0b11011, 0b10001]),
        'X' => Glyph::new(4, [0b1001, 0b1001, 0b0110, 0b1001, 0b1001]),
        'Y' => Glyph::new(5, [0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
        'Z' => Glyph::new(4, [0b1111, 0b0001, 0b0110, 0b1000, 0b1111]),
        '0' => Glyph::new(4, [0b0110, 0b1001, 0b1001, 0b1001, 0b0110]),
        '1' => Glyph::new(3, [0b010, 0b110, 0b010, 0b010, 0b111]),
        '2' => Glyph::new(4, [0b1110, 0b0001, 0b0110, 0b1000, 0b1111]),
        '3' => Glyph::new(4, [0b1110, 0b0001, 0b0110, 0b0001, 0b1110]),
        '4' => Glyph::new(4, [0b1001, 0b1001, 0b1111, 0b0001, 0b0001]),
        '5' => Glyph::new(4, [0b1111, 0b1000, 0b1110, 0b0001, 0b1110]),
        '6' => Glyph::new(4, [0b0110, 0b1000, 0b1110, 0b1001, 0b0110]),
        '7' => Glyph::new(4, [0b1111, 0b0001, 0b0010, 0b0100, 0b0100]),
        '8' => Glyph::new(4, [0b0110, 0b1001, 0b0110, 0b1001, 0b0110]),
        '9' => Glyph::new(4, [0b0110, 0b1001, 0b0111, 0b0001, 0b0110]),
        ' ' => Glyph::new(2, [0; 5]),
        '!' => Glyph::new(1, [1, 1, 1, 0, 1]),
        ':' => Glyph::new(1, [0, 1, 0, 1, 0]),
        '-' => Glyph::new(3, [0b000, 0b000, 0b111, 0b000, 0b000]),
        '.' => Glyph::new(1, [0, 0, 0, 0, 1]),
        '?' => Glyph::new(4, [0b0110, 0b1001, 0b0010, 0b0000, 0b0010]),
        _ => return None,
    };
    Some(g)
}

/// Horizontal advance of a single character
pub const fn char_advance(c: char) -> i32 {
    match glyph(c) {
        Some(g) => g.advance(),
        None => FALLBACK_ADVANCE,
    }
}

/// Measure the pixel width of text, including inter-glyph gaps
pub fn measure_text(text: &str) -> i32 {
    text.chars().map(char_advance).sum()
}

/// Draw a single character, returning the cursor advance
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub fn draw_char<S: PixelSink>(sink: &mut S, c: char, x: i32, y: i32, color: Rgb) -> i32 {
    let Some(g) = glyph(c) else {
        return FALLBACK_ADVANCE;
    };

    for (row_idx, _) in g.rows.iter().enumerate() {
        for col in 0..g.width {
            if g.is_set(col, row_idx) {
                sink.set_pixel(x + i32::from(col), y + row_idx as i32, color);
            }
        }
    }

    g.advance()
}

/// Draw text left to right starting at `x`, `y`
///
/// Returns the cursor position after the last character.
pub fn draw_text<S: PixelSink>(sink: &mut S, text: &str, x: i32, y: i32, color: Rgb) -> i32 {
    let mut cursor = x;
    for c in text.chars() {
        cursor += draw_char(sink, c, cursor, y, color);
    }
    cursor
}
