//! Random fading sparkles

use heapless::Vec;

use super::{Effect, EffectContext};
use crate::{HEIGHT, PixelSink, WIDTH, color::hsv_to_rgb};

/// Brightness lost per frame
const FADE_STEP: f32 = 0.1;
const SPAWN_CHANCE: f32 = 0.3;
const SATURATION: f32 = 0.5;

/// Frames a sparkle survives: it fades from 1.0 and goes at or below zero
/// on the tenth or eleventh fade, depending on float rounding
pub const SPARKLE_LIFETIME: usize = 11;

/// Room for every live sparkle, at most one spawns per frame
pub const MAX_SPARKLES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub x: i32,
    pub y: i32,
    /// Remaining brightness, `0.0..=1.0`
    pub brightness: f32,
    /// Hue in degrees
    pub hue: f32,
}

/// Sparkle effect with its live sparkles
#[derive(Debug, Clone, Default)]
pub struct SparkleEffect {
    sparkles: Vec<Sparkle, MAX_SPARKLES>,
}

impl SparkleEffect {
    pub const fn new() -> Self {
        Self {
            sparkles: Vec::new(),
        }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    /// Fade live sparkles, drop dead ones and maybe spawn a new one
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_precision_loss)]
    pub fn step(&mut self, ctx: &mut EffectContext<'_>) {
        for sparkle in &mut self.sparkles {
            sparkle.brightness -= FADE_STEP;
        }
        self.sparkles.retain(|sparkle| sparkle.brightness > 0.0);

        if ctx.rng.chance(SPAWN_CHANCE) {
            let sparkle = Sparkle {
                x: ctx.rng.range_i32(0, WIDTH as i32 - 1),
                y: ctx.rng.range_i32(0, HEIGHT as i32 - 1),
                brightness: 1.0,
                hue: ctx.rng.range_i32(0, 360) as f32,
            };
            // At most SPARKLE_LIFETIME sparkles are live after the spawn,
            // which stays under MAX_SPARKLES, so the push always fits
            let _ = self.sparkles.push(sparkle);
        }
    }
}

impl Effect for SparkleEffect {
    fn render<S: PixelSink>(&mut self, ctx: &mut EffectContext<'_>, sink: &mut S) {
        self.step(ctx);

        for sparkle in &self.sparkles {
            let color = hsv_to_rgb(sparkle.hue, SATURATION, sparkle.brightness);
            sink.set_pixel(sparkle.x, sparkle.y, color);
        }
    }

    fn clears_frame(&self) -> bool {
        true
    }
}
