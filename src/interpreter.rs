//! Command interpreter
//!
//! Maps inbound (topic, payload) pairs to display state transitions and
//! reports the side effects the caller has to apply.

use alloc::string::String;

use crate::{
    command::{Command, EffectRequest},
    config::Topics,
    effect::EffectId,
    state::DisplayState,
};

/// Side effects from an applied command that the controller should carry out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandEffects {
    /// Publish the state report
    pub publish_state: bool,
    /// New brightness to forward to the pixel driver
    pub brightness: Option<u8>,
    /// Clear and present the display immediately
    pub clear: bool,
}

impl CommandEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.publish_state || self.brightness.is_some() || self.clear
    }

    const fn applied() -> Self {
        Self {
            publish_state: true,
            brightness: None,
            clear: false,
        }
    }
}

/// Turns routed messages into display state transitions
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    topics: Topics,
}

impl CommandInterpreter {
    pub const fn new(topics: Topics) -> Self {
        Self { topics }
    }

    pub const fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Route, decode and apply a single inbound message
    ///
    /// Unknown topics and malformed payloads leave the state untouched and
    /// return no effects.
    pub fn handle(&self, state: &mut DisplayState, topic: &str, payload: &[u8]) -> CommandEffects {
        let Some(route) = self.topics.route(topic) else {
            log::debug!("ignoring message on unrouted topic {topic}");
            return CommandEffects::default();
        };

        match Command::decode(route, payload) {
            Ok(command) => Self::apply(state, command),
            Err(err) => {
                log::debug!("ignoring payload on {topic}: {err}");
                CommandEffects::default()
            }
        }
    }

    /// Apply a decoded command to the display state
    pub fn apply(state: &mut DisplayState, command: Command) -> CommandEffects {
        let mut effects = CommandEffects::applied();

        match command {
            Command::Text(text) => {
                state.text = text;
                state.reset_text_scroll();
                state.effect = EffectId::None;
                state.show_sensors = false;
            }
            Command::Brightness(brightness) => {
                state.brightness = brightness;
                effects.brightness = Some(brightness);
            }
            Command::Color(color) => {
                state.color = color;
            }
            Command::Effect(request) => Self::apply_effect(state, request),
            Command::Power(power) => {
                state.power = power;
                effects.clear = !power;
            }
            Command::Sensors(sensors) => {
                state.sensors = sensors;
                Self::enter_sensor_mode(state);
                state.reset_sensor_scroll();
            }
            Command::Door { name, status } => {
                state.sensors.insert(name, status);
                if !state.show_sensors {
                    state.reset_sensor_scroll();
                }
                Self::enter_sensor_mode(state);
            }
        }

        effects
    }

    fn apply_effect(state: &mut DisplayState, request: EffectRequest) {
        match request {
            EffectRequest::Clock => {
                if !state.show_sensors {
                    state.reset_sensor_scroll();
                }
                Self::enter_sensor_mode(state);
            }
            EffectRequest::Stop => {
                state.effect = EffectId::None;
            }
            EffectRequest::Run(id) => {
                state.effect = id;
                state.text = String::new();
                state.show_sensors = false;
            }
            EffectRequest::Unknown => {
                log::debug!("unknown effect requested, falling back to none");
                state.effect = EffectId::None;
                state.text = String::new();
                state.show_sensors = false;
            }
        }
    }

    fn enter_sensor_mode(state: &mut DisplayState) {
        state.show_sensors = true;
        state.text = String::new();
        state.effect = EffectId::None;
    }
}
