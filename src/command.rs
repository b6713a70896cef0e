//! Inbound command decoding
//!
//! Turns a routed topic and raw payload into a typed [`Command`]. Every
//! parser returns a [`CommandError`] instead of guessing, the interpreter
//! decides what a failure means.

use alloc::string::String;

use crate::{
    color::Rgb,
    config::Route,
    effect::EffectId,
    error::CommandError,
    math8::clamp_u8,
    state::{SensorMap, SensorName, SensorStatus},
};

/// Values accepted as "on" by the power command (case-insensitive)
const POWER_ON_VALUES: [&str; 3] = ["on", "true", "1"];

/// Pseudo-effect name that returns to the sensor / clock view
const EFFECT_NAME_CLOCK: &str = "clock";

/// Requested effect change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectRequest {
    /// Return to the sensor / clock view
    Clock,
    /// Stop effects without forcing the sensor view
    Stop,
    /// Run a known effect
    Run(EffectId),
    /// A name that is not a known effect, treated as a no-op effect
    Unknown,
}

impl EffectRequest {
    /// Parse an effect name (case-insensitive)
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case(EFFECT_NAME_CLOCK) {
            return Self::Clock;
        }
        let mut lower = heapless::String::<16>::new();
        for c in name.chars() {
            if lower.push(c.to_ascii_lowercase()).is_err() {
                return Self::Unknown;
            }
        }
        match EffectId::parse_from_str(&lower) {
            Some(EffectId::None) => Self::Stop,
            Some(id) => Self::Run(id),
            None => Self::Unknown,
        }
    }
}

/// Decoded inbound command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Text(String),
    Brightness(u8),
    Color(Rgb),
    Effect(EffectRequest),
    Power(bool),
    Sensors(SensorMap),
    Door {
        name: SensorName,
        status: SensorStatus,
    },
}

impl Command {
    /// Decode a payload for the given route
    pub fn decode(route: Route<'_>, payload: &[u8]) -> Result<Self, CommandError> {
        let payload = core::str::from_utf8(payload).map_err(|_| CommandError::InvalidUtf8)?;

        let command = match route {
            Route::Text => Self::Text(String::from(payload)),
            Route::Brightness => Self::Brightness(parse_brightness(payload)?),
            Route::Color => Self::Color(parse_color(payload)?),
            Route::Effect => Self::Effect(EffectRequest::parse(payload)),
            Route::Power => Self::Power(parse_power(payload)),
            Route::Sensors => Self::Sensors(parse_sensors(payload)?),
            Route::Door(name) => Self::Door {
                name: parse_door_name(name)?,
                status: SensorStatus::new(payload.trim()),
            },
        };
        Ok(command)
    }
}

/// Parse an integer brightness, clamping it to 0-255
pub fn parse_brightness(payload: &str) -> Result<u8, CommandError> {
    let value: i64 = payload
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidBrightness)?;
    Ok(clamp_u8(value))
}

/// Parse an `R,G,B` color
///
/// Exactly three integers are required. Channels outside 0-255 are accepted
/// and clamped.
pub fn parse_color(payload: &str) -> Result<Rgb, CommandError> {
    let mut channels = [0u8; 3];
    let mut parts = payload.split(',');

    for channel in &mut channels {
        let part = parts.next().ok_or(CommandError::InvalidColor)?;
        let value: i64 = part.trim().parse().map_err(|_| CommandError::InvalidColor)?;
        *channel = clamp_u8(value);
    }
    if parts.next().is_some() {
        return Err(CommandError::InvalidColor);
    }

    let [r, g, b] = channels;
    Ok(Rgb { r, g, b })
}

/// Parse a power payload, anything but an "on" value turns the display off
pub fn parse_power(payload: &str) -> bool {
    let payload = payload.trim();
    POWER_ON_VALUES
        .iter()
        .any(|on| on.eq_ignore_ascii_case(payload))
}

/// Parse a JSON object of sensor name to status
pub fn parse_sensors(payload: &str) -> Result<SensorMap, CommandError> {
    serde_json::from_str(payload).map_err(|_| CommandError::InvalidSensors)
}

fn parse_door_name(name: &str) -> Result<SensorName, CommandError> {
    if name.is_empty() {
        return Err(CommandError::InvalidDoorName);
    }
    Ok(SensorName::from(name))
}
