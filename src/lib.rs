//! # SeaWatch kit
//!
//! Native bridges behind the SeaWatch mobile app.
//!
//! The UI layer talks to native code over named method channels. This crate
//! bundles the channel plumbing and the bridges answering on those channels.
//!
//! ## Features
//!
//! - `channel`: method calls, the JSON method codec and the channel registry.
//! - `settings`: the device settings bridge (`it.unibo.csr.seawatch/device_settings`),
//!   which opens the location-source settings screen.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! seawatch-kit = { version = "0.1", features = ["settings"] }
//! ```
//!
//! ```rust,no_run
//! use seawatch_kit::settings::{self, ChannelRegistry, MethodCall, SettingsBridge, SystemSettingsHost};
//!
//! let registry = ChannelRegistry::new();
//! SettingsBridge::new(SystemSettingsHost).register(&registry);
//!
//! let call = MethodCall::new(settings::OPEN_LOCATION_ACTIVATION);
//! let opened = registry
//!     .invoke(settings::CHANNEL, &call)
//!     .ok()
//!     .and_then(|response| response.as_bool())
//!     .unwrap_or(false);
//! println!("settings opened: {opened}");
//! ```

#[cfg(feature = "channel")]
pub use seawatch_channel as channel;

#[cfg(feature = "settings")]
pub use seawatch_settings as settings;
