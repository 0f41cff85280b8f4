use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::protocol::command::SwitchCommand;
use crate::protocol::sender::CommandSender;
use crate::settings::Settings;

/// One logical light switch on a controller device, addressed by its index.
///
/// The cached on/off state tracks the last command that made it onto the
/// wire. The protocol has no acknowledgement or read-back channel, so a
/// device that silently drops a command leaves the cache diverging from
/// physical reality.
pub struct SwitchController {
    host: String,
    port: u16,
    index: u32,
    base_command: String,
    name: String,
    state: AtomicBool,
    // One in-flight command per switch, so concurrent callers cannot
    // reorder their effects on the cached state.
    command_guard: Mutex<()>,
    sender: CommandSender,
}

impl SwitchController {
    pub fn new(
        host: &str,
        port: u16,
        index: u32,
        base_command: &str,
        sender: CommandSender,
    ) -> Self {
        // Device indices are 1-based; index 0 would underflow the off
        // command's index - 1.
        assert!(index >= 1, "switch indices start at 1");
        SwitchController {
            host: host.to_string(),
            port,
            index,
            base_command: base_command.to_string(),
            name: format!("Light {index} @ {host}"),
            state: AtomicBool::new(false),
            command_guard: Mutex::new(()),
            sender,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Cached state only; performs no I/O.
    pub fn is_on(&self) -> bool {
        self.state.load(Ordering::SeqCst)
    }

    pub async fn turn_on(&self) {
        self.apply(SwitchCommand::On).await
    }

    pub async fn turn_off(&self) {
        self.apply(SwitchCommand::Off).await
    }

    /// The device offers no state query, so there is nothing to fetch. Kept
    /// as an explicit no-op for hosts that poll their entities.
    pub async fn refresh(&self) {}

    async fn apply(&self, command: SwitchCommand) {
        let _guard = self.command_guard.lock().await;
        let line = command.render(&self.base_command, self.index);
        match self.sender.send(&self.host, self.port, &line).await {
            Ok(()) => {
                self.state.store(command.target_state(), Ordering::SeqCst);
                debug!("Sent '{}' to {}", line, self.name);
            }
            Err(e) => error!("Failed to send command to {}: {}", self.name, e),
        }
    }
}

/// Builds one controller per light for every valid device entry. A malformed
/// entry is skipped with a warning; the rest of the batch still mounts.
pub fn setup_switches(settings: &Settings, sender: CommandSender) -> Vec<SwitchController> {
    let mut switches = Vec::new();
    for device in &settings.devices {
        if let Err(e) = device.validate() {
            warn!("Skipping device entry for '{}': {}", device.host, e);
            continue;
        }
        for index in 1..=device.number_of_lights {
            switches.push(SwitchController::new(
                &device.host,
                device.port,
                index,
                &device.base_command,
                sender,
            ));
        }
    }
    switches
}
