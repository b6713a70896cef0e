//! Fire effect
//!
//! Per-column heat diffusion: every cell cools a little, heat rises by
//! averaging the three cells below, and the bottom row is randomly ignited.
//!
//! The rise pass updates the grid in place, column by column, rows from the
//! top down. Column `x - 1` has therefore already been updated when column
//! `x` reads it, which gives the flames their leftward lean.

use super::{Effect, EffectContext};
use crate::{HEIGHT, PixelSink, WIDTH, color::Rgb};

const MAX_COOLDOWN: i32 = 3;
const IGNITE_CHANCE: f32 = 0.7;
const IGNITE_MIN: i32 = 160;
const IGNITE_MAX: i32 = 255;

/// Heat grid indexed as `heat[x][y]`, row 0 is the bottom of the flame
pub type HeatGrid = [[u8; HEIGHT]; WIDTH];

/// Fire effect with its heat memory
#[derive(Debug, Clone)]
pub struct FireEffect {
    heat: HeatGrid,
}

impl Default for FireEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl FireEffect {
    pub const fn new() -> Self {
        Self {
            heat: [[0; HEIGHT]; WIDTH],
        }
    }

    /// Current heat grid
    pub const fn heat(&self) -> &HeatGrid {
        &self.heat
    }

    /// Start from a given heat grid
    pub const fn with_heat(heat: HeatGrid) -> Self {
        Self { heat }
    }

    /// Advance the simulation by one step without drawing
    pub fn step(&mut self, ctx: &mut EffectContext<'_>) {
        self.cool(ctx);
        self.rise();
        self.ignite(ctx);
    }

    /// Let heat rise by one row, in place
    ///
    /// Each cell above the bottom row becomes the average of the three cells
    /// below it, wrapping at the side edges.
    #[allow(clippy::cast_possible_truncation)]
    pub fn rise(&mut self) {
        for x in 0..WIDTH {
            let left = (x + WIDTH - 1) % WIDTH;
            let right = (x + 1) % WIDTH;
            for y in (1..HEIGHT).rev() {
                let sum = u16::from(self.heat[x][y - 1])
                    + u16::from(self.heat[left][y - 1])
                    + u16::from(self.heat[right][y - 1]);
                self.heat[x][y] = (sum / 3) as u8;
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cool(&mut self, ctx: &mut EffectContext<'_>) {
        for column in &mut self.heat {
            for cell in column.iter_mut() {
                let cooldown = ctx.rng.range_i32(0, MAX_COOLDOWN) as u8;
                *cell = cell.saturating_sub(cooldown);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn ignite(&mut self, ctx: &mut EffectContext<'_>) {
        for column in &mut self.heat {
            if ctx.rng.chance(IGNITE_CHANCE) {
                let spark = ctx.rng.range_i32(IGNITE_MIN, IGNITE_MAX) as u8;
                column[0] = column[0].saturating_add(spark);
            }
        }
    }
}

/// Map heat to the black, red, yellow, white fire palette
pub const fn heat_color(heat: u8) -> Rgb {
    match heat {
        0..=63 => Rgb {
            r: heat * 4,
            g: 0,
            b: 0,
        },
        64..=127 => Rgb {
            r: 255,
            g: (heat - 64) * 4,
            b: 0,
        },
        128..=191 => Rgb {
            r: 255,
            g: 255,
            b: (heat - 128) * 4,
        },
        _ => Rgb {
            r: 255,
            g: 255,
            b: 255,
        },
    }
}

impl Effect for FireEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render<S: PixelSink>(&mut self, ctx: &mut EffectContext<'_>, sink: &mut S) {
        self.step(ctx);

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let heat = self.heat[x][HEIGHT - 1 - y];
                sink.set_pixel(x as i32, y as i32, heat_color(heat));
            }
        }
    }
}
