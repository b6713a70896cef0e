//! Terminal preview of the matrix
//!
//! [`Terminal`] is an [`OutputDriver`] that keeps the last frame, and
//! [`render_ansi`] turns a frame plus the display state into a boxed
//! 24-bit ANSI view with a status header.

use alloc::{format, string::String};
use core::fmt::{self, Write};

use crate::{
    HEIGHT, OutputDriver, WIDTH,
    color::{BLACK, Rgb},
    output::PIXEL_COUNT,
    state::{DisplayState, Mode},
};

const TITLE: &str = "STELLAR UNICORN SIMULATOR (16x16)";
const RULE_WIDTH: usize = 50;
const TEXT_PREVIEW_CHARS: usize = 20;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";

/// Output driver that records the most recent frame
#[derive(Debug, Clone)]
pub struct Terminal {
    frame: [Rgb; PIXEL_COUNT],
    frames_written: u32,
}

impl Default for Terminal {
    fn default() -> Self {
        Self {
            frame: [BLACK; PIXEL_COUNT],
            frames_written: 0,
        }
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn frame(&self) -> &[Rgb; PIXEL_COUNT] {
        &self.frame
    }

    pub const fn frames_written(&self) -> u32 {
        self.frames_written
    }
}

impl OutputDriver for Terminal {
    fn write(&mut self, colors: &[Rgb]) {
        let len = colors.len().min(PIXEL_COUNT);
        self.frame[..len].copy_from_slice(&colors[..len]);
        self.frames_written = self.frames_written.wrapping_add(1);
    }
}

/// Status line describing the active mode
pub fn mode_line(state: &DisplayState) -> String {
    match state.mode() {
        mode @ Mode::Effect(effect) => format!("Mode: {} ({})", mode.label(), effect.as_str()),
        Mode::Text => {
            let preview: String = state.text.chars().take(TEXT_PREVIEW_CHARS).collect();
            format!("Mode: {} \"{preview}\"", Mode::Text.label())
        }
        mode => format!("Mode: {}", mode.label()),
    }
}

/// Render the status header and frame as an ANSI string
pub fn render_ansi(state: &DisplayState, frame: &[Rgb]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_view(&mut out, state, frame);
    out
}

fn write_view<W: Write>(out: &mut W, state: &DisplayState, frame: &[Rgb]) -> fmt::Result {
    let rule: String = core::iter::repeat_n('=', RULE_WIDTH).collect();
    let edge: String = core::iter::repeat_n('\u{2500}', WIDTH * 2).collect();

    write!(out, "{CLEAR_SCREEN}")?;
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{rule}")?;

    if state.power {
        let Rgb { r, g, b } = state.color;
        writeln!(
            out,
            "  Brightness: {}% | Color: RGB({r},{g},{b})",
            brightness_percent(state.brightness)
        )?;
        writeln!(out, "  {}", mode_line(state))?;
    } else {
        writeln!(out, "  [DISPLAY OFF]")?;
    }
    writeln!(out, "{rule}")?;

    writeln!(out, "  \u{250c}{edge}\u{2510}")?;
    for row in frame.chunks(WIDTH).take(HEIGHT) {
        write!(out, "  \u{2502}")?;
        for pixel in row {
            if *pixel == BLACK {
                write!(out, "  ")?;
            } else {
                write!(out, "\x1b[48;2;{};{};{}m  {RESET}", pixel.r, pixel.g, pixel.b)?;
            }
        }
        writeln!(out, "\u{2502}")?;
    }
    writeln!(out, "  \u{2514}{edge}\u{2518}")
}

/// Brightness as a whole percentage, rounded down
pub fn brightness_percent(brightness: u8) -> u8 {
    let percent = u16::from(brightness) * 100 / 255;
    u8::try_from(percent).unwrap_or(100)
}
