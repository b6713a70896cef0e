//! Diagonal rainbow wave

use super::{Effect, EffectContext};
use crate::{HEIGHT, PixelSink, WIDTH, color::hsv_to_rgb};

const HUE_PER_PIXEL: u32 = 20;
const HUE_PER_FRAME: u32 = 5;

/// Rainbow effect, hue shifts along both axes and over time
#[derive(Debug, Clone, Copy, Default)]
pub struct RainbowEffect;

impl Effect for RainbowEffect {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    fn render<S: PixelSink>(&mut self, ctx: &mut EffectContext<'_>, sink: &mut S) {
        let shift = ctx.frame.wrapping_mul(HUE_PER_FRAME);
        for y in 0..HEIGHT as u32 {
            for x in 0..WIDTH as u32 {
                let hue = (HUE_PER_PIXEL * (x + y)).wrapping_add(shift) % 360;
                sink.set_pixel(x as i32, y as i32, hsv_to_rgb(hue as f32, 1.0, 1.0));
            }
        }
    }
}
