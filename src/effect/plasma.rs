//! Plasma effect
//!
//! Four overlapping sine fields averaged and mapped onto the hue circle.

use libm::{sinf, sqrtf};

use super::{Effect, EffectContext};
use crate::{HEIGHT, PixelSink, WIDTH, color::hsv_to_rgb};

const TIME_SCALE: f32 = 0.1;
const CENTER: f32 = 8.0;

/// Plasma effect
#[derive(Debug, Clone, Copy, Default)]
pub struct PlasmaEffect;

impl PlasmaEffect {
    /// Field value in `[-1, 1]` at a pixel for time `t`
    pub fn field(x: f32, y: f32, t: f32) -> f32 {
        let v1 = sinf(x * 0.5 + t);
        let v2 = sinf((y * 0.5 + t) * 0.5);
        let v3 = sinf((x * 0.3 + y * 0.3 + t) * 0.5);
        let dx = x - CENTER;
        let dy = y - CENTER;
        let v4 = sinf(sqrtf(dx * dx + dy * dy) * 0.5 - t);
        (v1 + v2 + v3 + v4) / 4.0
    }
}

impl Effect for PlasmaEffect {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss
    )]
    fn render<S: PixelSink>(&mut self, ctx: &mut EffectContext<'_>, sink: &mut S) {
        let t = ctx.frame as f32 * TIME_SCALE;
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let v = Self::field(x as f32, y as f32, t);
                let hue = ((v + 1.0) * 180.0) as i32 % 360;
                sink.set_pixel(x, y, hsv_to_rgb(hue as f32, 1.0, 1.0));
            }
        }
    }
}
