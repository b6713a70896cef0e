//! Physical brightness buttons

/// Brightness change per button press, about 5 %
pub const BRIGHTNESS_STEP: u8 = 13;

/// Polled brightness buttons
pub trait BrightnessInput {
    /// Returns if the brightness-up button is held
    fn brightness_up(&mut self) -> bool;

    /// Returns if the brightness-down button is held
    fn brightness_down(&mut self) -> bool;
}

/// Input for devices without buttons
#[derive(Debug, Clone, Copy, Default)]
pub struct NoButtons;

impl BrightnessInput for NoButtons {
    fn brightness_up(&mut self) -> bool {
        false
    }

    fn brightness_down(&mut self) -> bool {
        false
    }
}

/// Apply the held buttons to a brightness value
///
/// Returns the new brightness, or `None` if it did not change.
pub fn adjust_brightness<I: BrightnessInput>(input: &mut I, brightness: u8) -> Option<u8> {
    let mut next = brightness;
    if input.brightness_up() {
        next = next.saturating_add(BRIGHTNESS_STEP);
    }
    if input.brightness_down() {
        next = next.saturating_sub(BRIGHTNESS_STEP);
    }
    (next != brightness).then_some(next)
}
