//! Frame renderer
//!
//! Picks the active mode by precedence and draws exactly one of them per
//! call. Only the mode that ran advances its own scroll cursor or effect
//! memory.

use crate::{
    HEIGHT, PixelSink, WIDTH,
    clock::TimeSource,
    color::{ALERT_COLOR, CLOCK_COLOR},
    effect::{EffectContext, EffectId},
    font::{GLYPH_HEIGHT, draw_text, measure_text},
    rng::Rng,
    state::{DisplayState, Mode, scroll_origin},
};

/// Text cursor movement per frame
pub const TEXT_SCROLL_STEP: f32 = 0.4;

/// Alert marquee movement per frame, a little faster than text
pub const SENSOR_SCROLL_STEP: f32 = 0.5;

/// Gap appended after every name in the alert marquee
const MARQUEE_GAP: &str = "  ";

/// Clock rows
const CLOCK_HOURS_Y: i32 = 2;
const CLOCK_MINUTES_Y: i32 = 9;

/// Row that vertically centers a line of text
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const TEXT_Y: i32 = (HEIGHT as i32 - GLYPH_HEIGHT) / 2;

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const MATRIX_WIDTH: i32 = WIDTH as i32;

/// Renders the display state onto a pixel sink
pub struct Renderer<T: TimeSource> {
    clock: T,
    rng: Rng,
}

impl<T: TimeSource> Renderer<T> {
    pub const fn new(clock: T, rng: Rng) -> Self {
        Self { clock, rng }
    }

    pub const fn clock(&self) -> &T {
        &self.clock
    }

    pub const fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }

    /// Draw one frame
    ///
    /// The caller presents the sink afterwards. When power is off the sink
    /// is only cleared.
    pub fn render<S: PixelSink>(&mut self, state: &mut DisplayState, sink: &mut S) {
        match state.mode() {
            Mode::Off => {
                sink.clear();
                return;
            }
            Mode::Sensors => self.render_sensors(state, sink),
            Mode::Effect(effect) => self.render_effect(effect, state, sink),
            Mode::Text => render_text(state, sink),
            Mode::Solid => render_solid(state, sink),
        }
        state.frame = state.frame.wrapping_add(1);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn render_sensors<S: PixelSink>(&self, state: &mut DisplayState, sink: &mut S) {
        sink.clear();

        let gap = measure_text(MARQUEE_GAP);
        let total_width: i32 = state
            .open_sensors()
            .map(|name| measure_text(name) + gap)
            .sum();

        if total_width == 0 {
            self.render_clock(sink);
            return;
        }

        let mut x = state.sensor_scroll_pos as i32;
        for name in state.open_sensors() {
            draw_text(sink, name, x, TEXT_Y, ALERT_COLOR);
            x += measure_text(name) + gap;
        }

        state.sensor_scroll_pos -= SENSOR_SCROLL_STEP;
        if state.sensor_scroll_pos < -(total_width as f32) {
            state.sensor_scroll_pos = scroll_origin();
        }
    }

    fn render_clock<S: PixelSink>(&self, sink: &mut S) {
        let time = self.clock.now();
        for (value, y) in [(time.hour, CLOCK_HOURS_Y), (time.minute, CLOCK_MINUTES_Y)] {
            let digits = two_digits(value);
            let x = (MATRIX_WIDTH - measure_text(&digits)) / 2 + 1;
            draw_text(sink, &digits, x, y, CLOCK_COLOR);
        }
    }

    fn render_effect<S: PixelSink>(&mut self, effect: EffectId, state: &mut DisplayState, sink: &mut S) {
        let mut ctx = EffectContext {
            frame: state.frame,
            rng: &mut self.rng,
        };
        state.effects.render(effect, &mut ctx, sink);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn render_text<S: PixelSink>(state: &mut DisplayState, sink: &mut S) {
    sink.clear();

    let x = state.text_scroll_pos as i32;
    draw_text(sink, &state.text, x, TEXT_Y, state.color);

    state.text_scroll_pos -= TEXT_SCROLL_STEP;
    if state.text_scroll_pos < -(measure_text(&state.text) as f32) {
        state.reset_text_scroll();
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn render_solid<S: PixelSink>(state: &DisplayState, sink: &mut S) {
    for y in 0..HEIGHT as i32 {
        for x in 0..MATRIX_WIDTH {
            sink.set_pixel(x, y, state.color);
        }
    }
}

/// Zero-padded two digit number, values above 99 keep their last two digits
fn two_digits(value: u8) -> heapless::String<2> {
    let value = value % 100;
    let mut digits = heapless::String::new();
    for digit in [value / 10, value % 10] {
        // Two pushes always fit
        let _ = digits.push(char::from(b'0' + digit));
    }
    digits
}
