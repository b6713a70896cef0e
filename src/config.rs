//! Startup configuration and the logical topic set
//!
//! Configuration is consumed once at startup. Every field has a default so a
//! partial document (for example only credentials) is enough.

use alloc::{format, string::String};

use serde::Deserialize;

use crate::clock::UtcOffset;

const DEFAULT_PORT: u16 = 1883;
const DEFAULT_KEEPALIVE_SECS: u16 = 60;
const DEFAULT_CLIENT_ID: &str = "stellar_unicorn";
const DEFAULT_PREFIX: &str = "unicorn";
const DEFAULT_DOOR_STATE: &str = "home/door/+/state";
const DEFAULT_DISCOVERY_PREFIX: &str = "homeassistant";
const DEFAULT_DEVICE_ID: &str = "stellar_unicorn";
const DEFAULT_DEVICE_NAME: &str = "Stellar Unicorn";

/// Complete device configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub link: LinkConfig,
    pub broker: BrokerConfig,
    pub topics: TopicConfig,
    pub device: DeviceConfig,
    /// Hours from UTC. `None` selects automatic UK summer time.
    pub timezone_offset: Option<i8>,
}

impl Config {
    pub const fn utc_offset(&self) -> UtcOffset {
        UtcOffset::from_hours(self.timezone_offset)
    }
}

/// Station network credentials
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub ssid: String,
    pub password: String,
}

/// Pub/sub broker connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub client_id: String,
    pub keepalive_secs: u16,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            user: None,
            password: None,
            client_id: String::from(DEFAULT_CLIENT_ID),
            keepalive_secs: DEFAULT_KEEPALIVE_SECS,
        }
    }
}

impl BrokerConfig {
    /// User name, empty strings count as absent
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref().filter(|user| !user.is_empty())
    }

    /// Password, empty strings count as absent
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|password| !password.is_empty())
    }
}

/// Topic naming
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    /// Prefix for every command, state and availability topic
    pub prefix: String,
    /// Filter for per-door state updates, one `+` wildcard holds the door name
    pub door_state: String,
    /// Home automation discovery prefix
    pub discovery_prefix: String,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            prefix: String::from(DEFAULT_PREFIX),
            door_state: String::from(DEFAULT_DOOR_STATE),
            discovery_prefix: String::from(DEFAULT_DISCOVERY_PREFIX),
        }
    }
}

/// Device identity used for discovery
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub id: String,
    pub name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            id: String::from(DEFAULT_DEVICE_ID),
            name: String::from(DEFAULT_DEVICE_NAME),
        }
    }
}

/// Logical role of an inbound topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Text,
    Brightness,
    Color,
    Effect,
    Power,
    Sensors,
    /// Single door update, carrying the door name from the topic
    Door(&'a str),
}

/// Concrete topic names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub text: String,
    pub brightness: String,
    pub color: String,
    pub effect: String,
    pub power: String,
    pub sensors: String,
    pub door_state: String,
    pub state: String,
    pub availability: String,
    pub discovery_prefix: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self::new(&TopicConfig::default())
    }
}

impl Topics {
    pub fn new(config: &TopicConfig) -> Self {
        let prefix = config.prefix.trim_end_matches('/');
        Self {
            text: format!("{prefix}/text/set"),
            brightness: format!("{prefix}/brightness/set"),
            color: format!("{prefix}/color/set"),
            effect: format!("{prefix}/effect/set"),
            power: format!("{prefix}/power/set"),
            sensors: format!("{prefix}/sensors/set"),
            door_state: config.door_state.clone(),
            state: format!("{prefix}/state"),
            availability: format!("{prefix}/availability"),
            discovery_prefix: config.discovery_prefix.clone(),
        }
    }

    /// Every topic filter the session subscribes to
    pub fn subscriptions(&self) -> [&str; 7] {
        [
            self.text.as_str(),
            self.brightness.as_str(),
            self.color.as_str(),
            self.effect.as_str(),
            self.power.as_str(),
            self.sensors.as_str(),
            self.door_state.as_str(),
        ]
    }

    /// Map an inbound topic to its logical role
    pub fn route<'t>(&self, topic: &'t str) -> Option<Route<'t>> {
        let route = if topic == self.text {
            Route::Text
        } else if topic == self.brightness {
            Route::Brightness
        } else if topic == self.color {
            Route::Color
        } else if topic == self.effect {
            Route::Effect
        } else if topic == self.power {
            Route::Power
        } else if topic == self.sensors {
            Route::Sensors
        } else {
            Route::Door(wildcard_segment(&self.door_state, topic)?)
        };
        Some(route)
    }
}

/// Match `topic` against a filter with one `+` wildcard
///
/// Returns the topic segment the wildcard matched.
pub fn wildcard_segment<'t>(filter: &str, topic: &'t str) -> Option<&'t str> {
    let mut captured = None;
    let mut filter_parts = filter.split('/');
    let mut topic_parts = topic.split('/');

    loop {
        match (filter_parts.next(), topic_parts.next()) {
            (None, None) => return captured,
            (Some("+"), Some(segment)) => {
                if captured.is_none() {
                    captured = Some(segment);
                }
            }
            (Some(expected), Some(segment)) if expected == segment => {}
            _ => return None,
        }
    }
}
