//! Desktop settings launchers.

use crate::{LaunchOptions, SettingsError, SettingsScreen};

/// Windows: hand the `ms-settings:` URI to the WinRT launcher.
#[cfg(target_os = "windows")]
pub(crate) fn open_settings(
    screen: SettingsScreen,
    _options: &LaunchOptions,
) -> Result<(), SettingsError> {
    use windows::Foundation::Uri;
    use windows::System::Launcher;
    use windows::core::HSTRING;

    let uri = Uri::CreateUri(&HSTRING::from(screen.windows_uri()))
        .map_err(|e| SettingsError::LaunchFailure(e.message().to_string()))?;

    let launched = Launcher::LaunchUriAsync(&uri)
        .map_err(|e| SettingsError::LaunchFailure(e.message().to_string()))?
        .get()
        .map_err(|e| SettingsError::LaunchFailure(e.message().to_string()))?;

    if launched {
        Ok(())
    } else {
        Err(SettingsError::LaunchFailure(format!(
            "launcher declined {}",
            screen.windows_uri()
        )))
    }
}

/// Linux: start GNOME Settings on the matching panel.
///
/// The settings app keeps running after it opens; it is reaped on a
/// background thread so the call returns as soon as it has started.
#[cfg(target_os = "linux")]
pub(crate) fn open_settings(
    screen: SettingsScreen,
    _options: &LaunchOptions,
) -> Result<(), SettingsError> {
    use std::io::ErrorKind;
    use std::process::{Command, Stdio};

    match Command::new("gnome-control-center")
        .arg(screen.gnome_panel())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(mut child) => {
            std::thread::spawn(move || child.wait());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(SettingsError::NotSupported),
        Err(e) => Err(SettingsError::LaunchFailure(format!(
            "failed to start gnome-control-center: {e}"
        ))),
    }
}
