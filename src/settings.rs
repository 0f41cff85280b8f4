use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port the controller firmware listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 50505;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Device entry has no host")]
    MissingHost,
    #[error("Device entry has no base command")]
    MissingBaseCommand,
    #[error("number_of_lights must be at least 1")]
    NoLights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub devices: Vec<DeviceEntry>,
}

/// One controller device exposing `number_of_lights` switches, numbered
/// from 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub base_command: String,
    pub number_of_lights: u32,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl DeviceEntry {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.host.trim().is_empty() {
            return Err(SettingsError::MissingHost);
        }
        if self.base_command.is_empty() {
            return Err(SettingsError::MissingBaseCommand);
        }
        if self.number_of_lights == 0 {
            return Err(SettingsError::NoLights);
        }
        Ok(())
    }
}
