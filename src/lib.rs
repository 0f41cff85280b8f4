mod protocol;
mod settings;
mod switch;

pub use protocol::command::SwitchCommand;
pub use protocol::sender::{CommandSender, DEFAULT_SEND_TIMEOUT, SendError};
pub use settings::{DEFAULT_PORT, DeviceEntry, Settings, SettingsError};
pub use switch::{SwitchController, setup_switches};

#[cfg(test)]
mod test_helper;
