mod hsv;

pub use hsv::hsv_to_rgb;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Full white, the power-on color
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Muted teal used by the clock view
pub const CLOCK_COLOR: Rgb = Rgb {
    r: 0,
    g: 150,
    b: 120,
};

/// Alert red used by the open-sensor marquee
pub const ALERT_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };
