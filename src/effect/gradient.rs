//! Vertical hue gradient drifting over time

use super::{Effect, EffectContext};
use crate::{HEIGHT, PixelSink, WIDTH, color::hsv_to_rgb};

const HUE_PER_ROW: u32 = 20;
const HUE_PER_FRAME: u32 = 2;
const VALUE: f32 = 0.8;

/// Gradient effect, one hue per row
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientEffect;

impl Effect for GradientEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn render<S: PixelSink>(&mut self, ctx: &mut EffectContext<'_>, sink: &mut S) {
        let shift = ctx.frame.wrapping_mul(HUE_PER_FRAME);
        for y in 0..HEIGHT as u32 {
            let hue = shift.wrapping_add(y * HUE_PER_ROW) % 360;
            let color = hsv_to_rgb(hue as f32, 1.0, VALUE);
            for x in 0..WIDTH as i32 {
                sink.set_pixel(x, y as i32, color);
            }
        }
    }
}
