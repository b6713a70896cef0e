//! State report published after every applied command

use alloc::vec::Vec;

use serde::Serialize;

use crate::{color::Rgb, state::DisplayState};

/// Power state strings used in the report
const STATE_ON: &str = "ON";
const STATE_OFF: &str = "OFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorReport {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Rgb> for ColorReport {
    fn from(color: Rgb) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

/// JSON document sent to the state topic
///
/// `{"state":"ON","brightness":128,"color":{"r":..,"g":..,"b":..},"effect":"none","text":""}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateReport<'a> {
    pub state: &'static str,
    pub brightness: u8,
    pub color: ColorReport,
    pub effect: &'static str,
    pub text: &'a str,
}

impl<'a> StateReport<'a> {
    pub fn new(state: &'a DisplayState) -> Self {
        Self {
            state: if state.power { STATE_ON } else { STATE_OFF },
            brightness: state.brightness,
            color: state.color.into(),
            effect: state.effect.as_str(),
            text: &state.text,
        }
    }

    /// Serialize the report to a JSON payload
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
