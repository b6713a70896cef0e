#![no_std]

extern crate alloc;

pub mod clock;
pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod effect;
pub mod error;
pub mod font;
pub mod frame_scheduler;
pub mod input;
pub mod interpreter;
pub mod math8;
pub mod output;
pub mod renderer;
pub mod report;
pub mod rng;
pub mod simulator;
pub mod state;
pub mod supervisor;

pub use clock::{LocalTime, OffsetClock, TimeSource, UtcOffset, UtcSource};
pub use command::{Command, EffectRequest};
pub use config::{Config, Route, Topics};
pub use controller::Controller;
pub use effect::EffectId;
pub use error::{CommandError, LinkError, TransportError};
pub use frame_scheduler::FrameScheduler;
pub use input::BrightnessInput;
pub use interpreter::{CommandEffects, CommandInterpreter};
pub use output::Matrix;
pub use renderer::Renderer;
pub use state::{DisplayState, Mode, SensorMap};
pub use supervisor::{
    Backoff, ConnectOptions, Link, Message, PubSubClient, SessionConfig, Supervisor,
};

pub use color::{Rgb, hsv_to_rgb};
pub use embassy_time::{Duration, Instant};

/// Matrix width in pixels
pub const WIDTH: usize = 16;

/// Matrix height in pixels
pub const HEIGHT: usize = 16;

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`Matrix`] flushes its row-major frame through it on `present`.
pub trait OutputDriver {
    /// Write colors to the LED matrix
    fn write(&mut self, colors: &[Rgb]);
}

/// Pixel-addressed display surface
///
/// The renderer is generic over this trait. Implemented once per display
/// backend (hardware driver, terminal simulator, test recorder).
pub trait PixelSink {
    /// Set a single pixel. Coordinates outside the matrix are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb);

    /// Turn every pixel off
    fn clear(&mut self);

    /// Flush the pending frame to the display
    fn present(&mut self);

    /// Set global brightness (0-255), applied by the display, not the renderer
    fn set_brightness(&mut self, brightness: u8);
}
