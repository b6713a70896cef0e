//! Effect system with compile-time known effect variants
//!
//! Effects are identified by the closed [`EffectId`] enum and rendered with an
//! exhaustive match. Effects with animation memory keep it in
//! [`EffectMemory`], owned by the display state.

mod fire;
mod gradient;
mod matrix;
mod plasma;
mod rainbow;
mod sparkle;

pub use fire::{FireEffect, HeatGrid, heat_color};
pub use gradient::GradientEffect;
pub use matrix::{MatrixEffect, RainDrop, trail_level};
pub use plasma::PlasmaEffect;
pub use rainbow::RainbowEffect;
pub use sparkle::{MAX_SPARKLES, SPARKLE_LIFETIME, Sparkle, SparkleEffect};

use crate::{PixelSink, rng::Rng};

const EFFECT_NAME_NONE: &str = "none";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_FIRE: &str = "fire";
const EFFECT_NAME_PLASMA: &str = "plasma";
const EFFECT_NAME_SPARKLE: &str = "sparkle";
const EFFECT_NAME_MATRIX: &str = "matrix";
const EFFECT_NAME_GRADIENT: &str = "gradient";

/// Per-frame inputs shared by every effect
pub struct EffectContext<'a> {
    /// Frame counter, wrapping
    pub frame: u32,
    /// Randomness source
    pub rng: &'a mut Rng,
}

pub trait Effect {
    /// Render a single frame, advancing any animation memory
    fn render<S: PixelSink>(&mut self, ctx: &mut EffectContext<'_>, sink: &mut S);

    /// Returns if the effect expects a cleared matrix before drawing
    ///
    /// Effects that paint every pixel skip the clear.
    fn clears_frame(&self) -> bool {
        false
    }
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EffectId {
    #[default]
    None,
    Rainbow,
    Fire,
    Plasma,
    Sparkle,
    Matrix,
    Gradient,
}

impl EffectId {
    pub const COUNT: usize = 7;

    /// Every effect id, in the order advertised to home automation
    pub const ALL: [Self; Self::COUNT] = [
        Self::None,
        Self::Rainbow,
        Self::Fire,
        Self::Plasma,
        Self::Sparkle,
        Self::Matrix,
        Self::Gradient,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => EFFECT_NAME_NONE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Fire => EFFECT_NAME_FIRE,
            Self::Plasma => EFFECT_NAME_PLASMA,
            Self::Sparkle => EFFECT_NAME_SPARKLE,
            Self::Matrix => EFFECT_NAME_MATRIX,
            Self::Gradient => EFFECT_NAME_GRADIENT,
        }
    }

    /// Parse a lowercase effect name
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_NONE => Some(Self::None),
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_FIRE => Some(Self::Fire),
            EFFECT_NAME_PLASMA => Some(Self::Plasma),
            EFFECT_NAME_SPARKLE => Some(Self::Sparkle),
            EFFECT_NAME_MATRIX => Some(Self::Matrix),
            EFFECT_NAME_GRADIENT => Some(Self::Gradient),
            _ => None,
        }
    }
}

/// Animation memory for the effects that need it
#[derive(Debug, Clone)]
pub struct EffectMemory {
    pub fire: FireEffect,
    pub matrix: MatrixEffect,
    pub sparkle: SparkleEffect,
}

impl EffectMemory {
    pub fn new(rng: &mut Rng) -> Self {
        Self {
            fire: FireEffect::new(),
            matrix: MatrixEffect::new(rng),
            sparkle: SparkleEffect::new(),
        }
    }

    /// Render the effect with the given id
    ///
    /// `EffectId::None` draws nothing.
    pub fn render<S: PixelSink>(
        &mut self,
        id: EffectId,
        ctx: &mut EffectContext<'_>,
        sink: &mut S,
    ) {
        match id {
            EffectId::None => {}
            EffectId::Rainbow => run(&mut RainbowEffect, ctx, sink),
            EffectId::Fire => run(&mut self.fire, ctx, sink),
            EffectId::Plasma => run(&mut PlasmaEffect, ctx, sink),
            EffectId::Sparkle => run(&mut self.sparkle, ctx, sink),
            EffectId::Matrix => run(&mut self.matrix, ctx, sink),
            EffectId::Gradient => run(&mut GradientEffect, ctx, sink),
        }
    }
}

fn run<E: Effect, S: PixelSink>(effect: &mut E, ctx: &mut EffectContext<'_>, sink: &mut S) {
    if effect.clears_frame() {
        sink.clear();
    }
    effect.render(ctx, sink);
}
