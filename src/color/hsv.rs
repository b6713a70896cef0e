use libm::{fabsf, fmodf};

use crate::color::Rgb;

const HUE_CIRCLE: f32 = 360.0;
const SECTOR: f32 = 60.0;

/// Convert a floating point HSV color to RGB
///
/// # Arguments
/// * `hue` - Hue in degrees, wrapped into `[0, 360)` before use
/// * `sat` - Saturation, `0.0..=1.0`
/// * `val` - Value, `0.0..=1.0`
///
/// Channels are truncated, not rounded.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
pub fn hsv_to_rgb(hue: f32, sat: f32, val: f32) -> Rgb {
    let mut h = fmodf(hue, HUE_CIRCLE);
    if h < 0.0 {
        h += HUE_CIRCLE;
    }

    let c = val * sat;
    let x = c * (1.0 - fabsf(fmodf(h / SECTOR, 2.0) - 1.0));
    let m = val - c;

    let (r, g, b) = if h < SECTOR {
        (c, x, 0.0)
    } else if h < SECTOR * 2.0 {
        (x, c, 0.0)
    } else if h < SECTOR * 3.0 {
        (0.0, c, x)
    } else if h < SECTOR * 4.0 {
        (0.0, x, c)
    } else if h < SECTOR * 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb {
        r: ((r + m) * 255.0) as u8,
        g: ((g + m) * 255.0) as u8,
        b: ((b + m) * 255.0) as u8,
    }
}
