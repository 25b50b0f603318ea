use thiserror::Error;

/// Errors reported by a settings host.
///
/// The bridge never passes these to its caller; they become a `false` reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The host could not present the settings screen.
    #[error("failed to launch settings screen: {0}")]
    LaunchFailure(String),

    /// This platform has no settings screen to open.
    #[error("settings screen not supported on this platform")]
    NotSupported,
}
