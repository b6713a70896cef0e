//! Matrix rain effect
//!
//! One falling drop per column with a fading green trail.

use super::{Effect, EffectContext};
use crate::{HEIGHT, PixelSink, WIDTH, color::Rgb, rng::Rng};

const TRAIL_LEN: i32 = 8;
const TRAIL_FADE: i32 = 30;
const RESPAWN_MIN_Y: i32 = -8;
const RESPAWN_MAX_Y: i32 = -1;
const RESPAWN_MIN_SPEED: f32 = 0.1;
const RESPAWN_MAX_SPEED: f32 = 0.4;
const INITIAL_MAX_SPEED: f32 = 0.3;

/// Head of a falling trail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainDrop {
    pub y: f32,
    pub speed: f32,
}

/// Matrix rain effect with one drop per column
#[derive(Debug, Clone)]
pub struct MatrixEffect {
    drops: [RainDrop; WIDTH],
}

impl MatrixEffect {
    /// Scatter the initial drops above and across the matrix
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    pub fn new(rng: &mut Rng) -> Self {
        let drops = core::array::from_fn(|_| RainDrop {
            y: rng.range_i32(-(HEIGHT as i32), 0) as f32,
            speed: rng.uniform(RESPAWN_MIN_SPEED, INITIAL_MAX_SPEED),
        });
        Self { drops }
    }

    pub const fn drops(&self) -> &[RainDrop; WIDTH] {
        &self.drops
    }
}

/// Green level of the trail pixel `i` steps above the head
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn trail_level(i: i32) -> u8 {
    let level = 255 - i * TRAIL_FADE;
    if level < 0 { 0 } else { level as u8 }
}

impl Effect for MatrixEffect {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss
    )]
    fn render<S: PixelSink>(&mut self, ctx: &mut EffectContext<'_>, sink: &mut S) {
        for (x, drop) in self.drops.iter_mut().enumerate() {
            let head = drop.y as i32;

            for i in 0..TRAIL_LEN {
                let trail_y = head - i;
                if (0..HEIGHT as i32).contains(&trail_y) {
                    let color = Rgb {
                        r: 0,
                        g: trail_level(i),
                        b: 0,
                    };
                    sink.set_pixel(x as i32, trail_y, color);
                }
            }

            drop.y += drop.speed;

            if drop.y > (HEIGHT as i32 + TRAIL_LEN) as f32 {
                drop.y = ctx.rng.range_i32(RESPAWN_MIN_Y, RESPAWN_MAX_Y) as f32;
                drop.speed = ctx.rng.uniform(RESPAWN_MIN_SPEED, RESPAWN_MAX_SPEED);
            }
        }
    }

    fn clears_frame(&self) -> bool {
        true
    }
}
