//! Apple settings launcher.
//!
//! macOS opens the Privacy & Security pane through its settings URL. iOS only
//! allows opening the app's own settings page, so location settings are not
//! supported there.

use crate::{LaunchOptions, SettingsError, SettingsScreen};

#[cfg(target_os = "macos")]
pub(crate) fn open_settings(
    screen: SettingsScreen,
    _options: &LaunchOptions,
) -> Result<(), SettingsError> {
    use std::process::Command;

    let status = Command::new("open")
        .arg(screen.macos_url())
        .status()
        .map_err(|e| SettingsError::LaunchFailure(format!("failed to run open: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(SettingsError::LaunchFailure(format!(
            "open exited with {status}"
        )))
    }
}

#[cfg(target_os = "ios")]
pub(crate) fn open_settings(
    _screen: SettingsScreen,
    _options: &LaunchOptions,
) -> Result<(), SettingsError> {
    Err(SettingsError::NotSupported)
}
