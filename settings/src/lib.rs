//! Device settings bridge for the SeaWatch app.
//!
//! Registers the `it.unibo.csr.seawatch/device_settings` channel. Its single
//! method, `openLocationActivation`, asks the operating system to show the
//! location-source settings screen and replies `true` if the screen was
//! launched, `false` otherwise. Any other method is answered with the
//! "not implemented" reply.

#![warn(missing_docs)]

mod bridge;
mod config;
mod error;

/// Platform-specific implementations.
pub mod sys;

pub use bridge::{SettingsBridge, SettingsHost};
pub use config::{
    BridgeConfig, FLAG_ACTIVITY_EXCLUDE_FROM_RECENTS, FLAG_ACTIVITY_NO_HISTORY, LaunchOptions,
};
pub use error::SettingsError;
pub use seawatch_channel::{ChannelRegistry, MethodCall, MethodResponse};
pub use sys::SystemSettingsHost;

/// Name of the channel the UI layer talks to.
pub const CHANNEL: &str = "it.unibo.csr.seawatch/device_settings";

/// Method that opens the location-source settings screen.
pub const OPEN_LOCATION_ACTIVATION: &str = "openLocationActivation";

/// System settings screens the bridge knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SettingsScreen {
    /// Location source (GPS / location services) settings.
    LocationSource,
}

impl SettingsScreen {
    /// Android `Intent` action for this screen.
    pub const fn android_action(self) -> &'static str {
        match self {
            Self::LocationSource => "android.settings.LOCATION_SOURCE_SETTINGS",
        }
    }

    /// `ms-settings:` URI for this screen.
    pub const fn windows_uri(self) -> &'static str {
        match self {
            Self::LocationSource => "ms-settings:privacy-location",
        }
    }

    /// System Settings URL for this screen on macOS.
    pub const fn macos_url(self) -> &'static str {
        match self {
            Self::LocationSource => {
                "x-apple.systempreferences:com.apple.preference.security?Privacy_LocationServices"
            }
        }
    }

    /// GNOME Settings panel for this screen.
    pub const fn gnome_panel(self) -> &'static str {
        match self {
            Self::LocationSource => "location",
        }
    }
}

/// Open the location-source settings screen using the platform host.
///
/// Returns `true` if the screen was launched. Never fails.
pub fn open_location_activation() -> bool {
    SettingsBridge::new(SystemSettingsHost).open_location_activation()
}
