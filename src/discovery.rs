//! Home automation discovery documents
//!
//! Two retained documents describe the device: a light entity (power,
//! brightness, color and effect) and a text entity for the scrolling text.

use alloc::{format, string::String, vec::Vec};

use serde::Serialize;

use crate::{
    config::{DeviceConfig, Topics},
    effect::EffectId,
};

const AVAILABLE: &str = "online";
const NOT_AVAILABLE: &str = "offline";
const MODEL: &str = "Stellar Unicorn 16x16";
const MANUFACTURER: &str = "Pimoroni";

#[derive(Debug, Serialize)]
struct Device<'a> {
    identifiers: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manufacturer: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct LightConfig<'a> {
    name: &'a str,
    unique_id: String,
    command_topic: &'a str,
    state_topic: &'a str,
    state_value_template: &'static str,
    brightness_command_topic: &'a str,
    brightness_state_topic: &'a str,
    brightness_value_template: &'static str,
    rgb_command_topic: &'a str,
    rgb_command_template: &'static str,
    rgb_state_topic: &'a str,
    rgb_value_template: &'static str,
    effect_command_topic: &'a str,
    effect_state_topic: &'a str,
    effect_value_template: &'static str,
    effect_list: [&'static str; EffectId::COUNT],
    availability_topic: &'a str,
    payload_available: &'static str,
    payload_not_available: &'static str,
    device: Device<'a>,
}

#[derive(Debug, Serialize)]
struct TextConfig<'a> {
    name: String,
    unique_id: String,
    command_topic: &'a str,
    state_topic: &'a str,
    value_template: &'static str,
    availability_topic: &'a str,
    device: Device<'a>,
}

/// A retained discovery document ready to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Build the light entity document
pub fn light_config(
    topics: &Topics,
    device: &DeviceConfig,
) -> Result<DiscoveryMessage, serde_json::Error> {
    let config = LightConfig {
        name: &device.name,
        unique_id: format!("{}_light", device.id),
        command_topic: &topics.power,
        state_topic: &topics.state,
        state_value_template: "{{ value_json.state }}",
        brightness_command_topic: &topics.brightness,
        brightness_state_topic: &topics.state,
        brightness_value_template: "{{ value_json.brightness }}",
        rgb_command_topic: &topics.color,
        rgb_command_template: "{{ red }},{{ green }},{{ blue }}",
        rgb_state_topic: &topics.state,
        rgb_value_template: "{{ value_json.color.r }},{{ value_json.color.g }},{{ value_json.color.b }}",
        effect_command_topic: &topics.effect,
        effect_state_topic: &topics.state,
        effect_value_template: "{{ value_json.effect }}",
        effect_list: EffectId::ALL.map(EffectId::as_str),
        availability_topic: &topics.availability,
        payload_available: AVAILABLE,
        payload_not_available: NOT_AVAILABLE,
        device: Device {
            identifiers: [device.id.as_str()],
            name: Some(device.name.as_str()),
            model: Some(MODEL),
            manufacturer: Some(MANUFACTURER),
        },
    };

    Ok(DiscoveryMessage {
        topic: format!("{}/light/{}/config", topics.discovery_prefix, device.id),
        payload: serde_json::to_vec(&config)?,
    })
}

/// Build the text entity document
pub fn text_config(
    topics: &Topics,
    device: &DeviceConfig,
) -> Result<DiscoveryMessage, serde_json::Error> {
    let config = TextConfig {
        name: format!("{} Text", device.name),
        unique_id: format!("{}_text", device.id),
        command_topic: &topics.text,
        state_topic: &topics.state,
        value_template: "{{ value_json.text }}",
        availability_topic: &topics.availability,
        device: Device {
            identifiers: [device.id.as_str()],
            name: None,
            model: None,
            manufacturer: None,
        },
    };

    Ok(DiscoveryMessage {
        topic: format!("{}/text/{}_text/config", topics.discovery_prefix, device.id),
        payload: serde_json::to_vec(&config)?,
    })
}

/// Every discovery document, light first
pub fn discovery_messages(
    topics: &Topics,
    device: &DeviceConfig,
) -> Result<[DiscoveryMessage; 2], serde_json::Error> {
    Ok([light_config(topics, device)?, text_config(topics, device)?])
}
