//! Display state
//!
//! The single owned record describing what the matrix should show. It is
//! mutated by the command interpreter and by the renderer's animation step.

use alloc::{format, string::String, vec::Vec};
use core::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::{
    WIDTH,
    color::{Rgb, WHITE},
    effect::{EffectId, EffectMemory},
    rng::Rng,
};

/// Brightness applied at startup
pub const DEFAULT_BRIGHTNESS: u8 = 128;

/// Statuses that mean "open" (compared case-insensitively)
const OPEN_STATUSES: [&str; 4] = ["open", "on", "true", "1"];

pub type SensorName = String;

/// Returns if the status string means "open / alert"
pub fn is_open_status(status: &str) -> bool {
    OPEN_STATUSES
        .iter()
        .any(|open| open.eq_ignore_ascii_case(status.trim()))
}

/// Sensor status as reported by the home automation side
///
/// Accepts JSON strings, booleans and integers; non-string values are kept in
/// their textual form so `true` and `1` behave like `"true"` and `"1"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorStatus(String);

impl SensorStatus {
    pub fn new(status: &str) -> Self {
        Self(String::from(status))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns if the status means "open / alert"
    pub fn is_open(&self) -> bool {
        is_open_status(&self.0)
    }
}

impl<'de> Deserialize<'de> for SensorStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StatusVisitor;

        impl Visitor<'_> for StatusVisitor {
            type Value = SensorStatus;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sensor status string, boolean or integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(SensorStatus::new(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(SensorStatus::new(if v { "true" } else { "false" }))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(SensorStatus(format!("{v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(SensorStatus(format!("{v}")))
            }
        }

        deserializer.deserialize_any(StatusVisitor)
    }
}

/// Ordered sensor name to status mapping. Insertion order is marquee order.
///
/// Sensor counts are small, lookups are linear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorMap {
    entries: Vec<(SensorName, SensorStatus)>,
}

impl SensorMap {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SensorStatus> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, status)| status)
    }

    /// Set the status of a sensor
    ///
    /// An existing sensor keeps its position and the previous status is
    /// returned. A new sensor is appended.
    pub fn insert(
        &mut self,
        name: impl Into<SensorName>,
        status: SensorStatus,
    ) -> Option<SensorStatus> {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => Some(core::mem::replace(current, status)),
            None => {
                self.entries.push((name, status));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SensorName, &SensorStatus)> {
        self.entries.iter().map(|(name, status)| (name, status))
    }

    pub fn keys(&self) -> impl Iterator<Item = &SensorName> {
        self.entries.iter().map(|(name, _)| name)
    }

    pub fn values(&self) -> impl Iterator<Item = &SensorStatus> {
        self.entries.iter().map(|(_, status)| status)
    }
}

impl<'de> Deserialize<'de> for SensorMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SensorMapVisitor;

        impl<'de> Visitor<'de> for SensorMapVisitor {
            type Value = SensorMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of sensor name to status")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut sensors = SensorMap::new();
                // Duplicate keys keep the first position and the last status
                while let Some((name, status)) = access.next_entry::<SensorName, SensorStatus>()? {
                    sensors.insert(name, status);
                }
                Ok(sensors)
            }
        }

        deserializer.deserialize_map(SensorMapVisitor)
    }
}

/// Rendering mode selected by precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Power is off, display is cleared
    Off,
    /// Open-sensor marquee or clock
    Sensors,
    /// Procedural effect
    Effect(EffectId),
    /// Scrolling free text
    Text,
    /// Solid fill with the selected color
    Solid,
}

impl Mode {
    /// Human readable label, used by the simulator header
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Sensors => "Sensor Status",
            Self::Effect(_) => "Effect",
            Self::Text => "Text",
            Self::Solid => "Solid Color",
        }
    }
}

/// What should currently be shown on the matrix
#[derive(Debug, Clone)]
pub struct DisplayState {
    pub power: bool,
    pub brightness: u8,
    pub color: Rgb,
    pub effect: EffectId,
    pub text: String,
    pub sensors: SensorMap,
    pub show_sensors: bool,

    // Animation state
    pub frame: u32,
    pub text_scroll_pos: f32,
    pub sensor_scroll_pos: f32,

    // Effect-specific memory
    pub effects: EffectMemory,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(&mut Rng::default())
    }
}

impl DisplayState {
    /// Create the power-on state, seeding effect memory from `rng`
    pub fn new(rng: &mut Rng) -> Self {
        Self {
            power: true,
            brightness: DEFAULT_BRIGHTNESS,
            color: WHITE,
            effect: EffectId::None,
            text: String::new(),
            sensors: SensorMap::new(),
            show_sensors: true,
            frame: 0,
            text_scroll_pos: scroll_origin(),
            sensor_scroll_pos: scroll_origin(),
            effects: EffectMemory::new(rng),
        }
    }

    /// Mode that drives the next render
    pub fn mode(&self) -> Mode {
        if !self.power {
            Mode::Off
        } else if self.show_sensors {
            Mode::Sensors
        } else if self.effect != EffectId::None {
            Mode::Effect(self.effect)
        } else if !self.text.is_empty() {
            Mode::Text
        } else {
            Mode::Solid
        }
    }

    /// Names of open sensors in insertion order
    pub fn open_sensors(&self) -> impl Iterator<Item = &str> {
        self.sensors
            .iter()
            .filter(|(_, status)| status.is_open())
            .map(|(name, _)| name.as_str())
    }

    pub fn reset_text_scroll(&mut self) {
        self.text_scroll_pos = scroll_origin();
    }

    pub fn reset_sensor_scroll(&mut self) {
        self.sensor_scroll_pos = scroll_origin();
    }
}

/// Scroll cursors start at the right edge of the matrix
#[allow(clippy::cast_precision_loss)]
pub(crate) fn scroll_origin() -> f32 {
    WIDTH as f32
}
