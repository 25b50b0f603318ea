//! Platform-specific settings launchers.

use crate::{LaunchOptions, SettingsError, SettingsHost, SettingsScreen};

/// Android platform implementation.
#[cfg(target_os = "android")]
pub mod android;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod apple;

#[cfg(any(target_os = "windows", target_os = "linux"))]
mod desktop;

#[cfg(target_os = "android")]
use android::open_settings;

#[cfg(any(target_os = "macos", target_os = "ios"))]
use apple::open_settings;

#[cfg(any(target_os = "windows", target_os = "linux"))]
use desktop::open_settings;

// Fallback for platforms without a settings screen
#[cfg(not(any(
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "windows",
    target_os = "linux"
)))]
fn open_settings(_screen: SettingsScreen, _options: &LaunchOptions) -> Result<(), SettingsError> {
    Err(SettingsError::NotSupported)
}

/// Opens settings screens through the operating system of the current target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSettingsHost;

impl SettingsHost for SystemSettingsHost {
    fn open_settings(
        &self,
        screen: SettingsScreen,
        options: &LaunchOptions,
    ) -> Result<(), SettingsError> {
        open_settings(screen, options)
    }
}
