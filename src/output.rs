//! Frame buffer pixel sink
//!
//! [`Matrix`] collects pixel writes for one frame and, on `present`, applies
//! the global brightness and flushes the row-major frame to an
//! [`OutputDriver`].

use crate::{
    HEIGHT, OutputDriver, PixelSink, WIDTH,
    color::{BLACK, Rgb},
    math8::scale_rgb,
    state::DEFAULT_BRIGHTNESS,
};

/// Number of pixels in a frame
pub const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// 16x16 frame buffer in front of an LED driver
pub struct Matrix<O: OutputDriver> {
    output: O,
    frame: [Rgb; PIXEL_COUNT],
    scaled: [Rgb; PIXEL_COUNT],
    brightness: u8,
}

impl<O: OutputDriver> Matrix<O> {
    pub const fn new(output: O) -> Self {
        Self {
            output,
            frame: [BLACK; PIXEL_COUNT],
            scaled: [BLACK; PIXEL_COUNT],
            brightness: DEFAULT_BRIGHTNESS,
        }
    }

    /// Frame as drawn, before brightness
    pub const fn frame(&self) -> &[Rgb; PIXEL_COUNT] {
        &self.frame
    }

    /// Color of a single pixel, before brightness
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some(self.frame[y * WIDTH + x])
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub const fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|x| *x < WIDTH)?;
        let y = usize::try_from(y).ok().filter(|y| *y < HEIGHT)?;
        Some(y * WIDTH + x)
    }
}

impl<O: OutputDriver> PixelSink for Matrix<O> {
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(index) = Self::index(x, y) {
            self.frame[index] = color;
        }
    }

    fn clear(&mut self) {
        self.frame.fill(BLACK);
    }

    fn present(&mut self) {
        for (scaled, pixel) in self.scaled.iter_mut().zip(self.frame.iter()) {
            *scaled = scale_rgb(*pixel, self.brightness);
        }
        self.output.write(&self.scaled);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }
}
