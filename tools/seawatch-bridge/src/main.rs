use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use owo_colors::OwoColorize;
use seawatch_channel::{ChannelRegistry, MethodCall, MethodResponse};
use seawatch_settings::{
    BridgeConfig, CHANNEL, LaunchOptions, OPEN_LOCATION_ACTIVATION, SettingsBridge, SettingsError,
    SettingsHost, SettingsScreen, SystemSettingsHost,
};

#[derive(Parser)]
#[command(name = "seawatch-bridge")]
#[command(about = "Send method calls to the SeaWatch device settings channel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a method on a channel, as the UI layer would
    Call {
        /// Method name
        method: String,
        /// Arguments as JSON
        #[arg(long)]
        args: Option<String>,
        /// Channel to send the call on
        #[arg(long, default_value = CHANNEL)]
        channel: String,
        /// Bridge configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the settings request instead of opening the screen
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the channel and method names
    Constants,
}

/// Host that only reports what would have been opened.
#[derive(Debug)]
struct DryRunHost;

impl SettingsHost for DryRunHost {
    fn open_settings(
        &self,
        screen: SettingsScreen,
        options: &LaunchOptions,
    ) -> Result<(), SettingsError> {
        println!(
            "{} {screen:?} (no history: {}, exclude from recents: {})",
            "would open".cyan(),
            options.no_history,
            options.exclude_from_recents
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Call {
            method,
            args,
            channel,
            config,
            dry_run,
        } => call(&method, args.as_deref(), &channel, config, dry_run),
        Commands::Constants => {
            println!("channel: {}", CHANNEL.bold());
            println!("method:  {}", OPEN_LOCATION_ACTIVATION.bold());
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<BridgeConfig> {
    let Some(path) = path else {
        return Ok(BridgeConfig::default());
    };

    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    BridgeConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

fn call(
    method: &str,
    args: Option<&str>,
    channel: &str,
    config: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let arguments = match args {
        Some(json) => serde_json::from_str(json).context("Arguments are not valid JSON")?,
        None => serde_json::Value::Null,
    };

    let host: Arc<dyn SettingsHost> = if dry_run {
        Arc::new(DryRunHost)
    } else {
        Arc::new(SystemSettingsHost)
    };

    let registry = ChannelRegistry::new();
    SettingsBridge::with_config(host, config).register(&registry);

    info!("sending {method} on {channel}");
    let call = MethodCall::new(method).with_arguments(arguments);
    let response = registry
        .invoke(channel, &call)
        .context("Failed to decode reply")?;

    match response {
        MethodResponse::Success(value) => println!("{} {value}", "success".green().bold()),
        MethodResponse::Error {
            code,
            message,
            details,
        } => println!(
            "{} {code}: {} {details}",
            "error".red().bold(),
            message.unwrap_or_default()
        ),
        MethodResponse::NotImplemented => println!("{}", "not implemented".yellow().bold()),
    }

    Ok(())
}
