use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_derive::{Parser, Subcommand};
use telnet_switch_rs::{CommandSender, DeviceEntry, Settings, SwitchController, setup_switches};
use tracing_subscriber::EnvFilter;

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print every configured switch with its cached state
    List,
    /// Turn one switch on
    On {
        #[arg(long)]
        index: u32,
    },
    /// Turn one switch off
    Off {
        #[arg(long)]
        index: u32,
    },
}

#[derive(Parser, Debug)]
struct Params {
    /// Hostname or IP address of the switch controller
    #[clap(long)]
    host: Option<String>,
    /// Port the controller listens on (default: 50505)
    #[clap(long, default_value = "50505")]
    port: u16,
    /// Per-device command prefix
    #[clap(long)]
    base_command: Option<String>,
    /// Number of lights behind the controller
    #[clap(long, default_value = "1")]
    number_of_lights: u32,
    /// Settings file path (JSON); takes precedence over the flags above
    #[clap(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let params = Params::parse();
    let settings = load_settings(&params)?;
    let switches = setup_switches(&settings, CommandSender::default());
    if switches.is_empty() {
        bail!("No valid device entries configured");
    }

    match params.command {
        Commands::List => {
            for switch in &switches {
                println!(
                    "{}: {}",
                    switch.name(),
                    if switch.is_on() { "on" } else { "off" }
                );
            }
        }
        Commands::On { index } => {
            find_switch(&switches, index)?.turn_on().await;
        }
        Commands::Off { index } => {
            find_switch(&switches, index)?.turn_off().await;
        }
    }

    Ok(())
}

fn load_settings(params: &Params) -> Result<Settings> {
    if let Some(path) = &params.config {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read settings file {path}"))?;
        return serde_json::from_str(&raw).context("Malformed settings file");
    }
    let Some(host) = params.host.clone() else {
        bail!("Either --config or --host with --base-command is required");
    };
    let Some(base_command) = params.base_command.clone() else {
        bail!("--base-command is required when --host is used");
    };
    Ok(Settings {
        devices: vec![DeviceEntry {
            host,
            port: params.port,
            base_command,
            number_of_lights: params.number_of_lights,
        }],
    })
}

fn find_switch(switches: &[SwitchController], index: u32) -> Result<&SwitchController> {
    switches
        .iter()
        .find(|s| s.index() == index)
        .with_context(|| format!("No switch with index {index}"))
}
