use serde::{Deserialize, Serialize};

use crate::CHANNEL;

/// `Intent.FLAG_ACTIVITY_NO_HISTORY`.
pub const FLAG_ACTIVITY_NO_HISTORY: i32 = 0x4000_0000;
/// `Intent.FLAG_ACTIVITY_EXCLUDE_FROM_RECENTS`.
pub const FLAG_ACTIVITY_EXCLUDE_FROM_RECENTS: i32 = 0x0080_0000;

/// How the settings screen is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaunchOptions {
    /// Keep the screen out of the task history / back stack.
    pub no_history: bool,
    /// Keep the screen out of the recent-tasks overview.
    pub exclude_from_recents: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            no_history: true,
            exclude_from_recents: true,
        }
    }
}

impl LaunchOptions {
    /// Android `Intent` flags for these options.
    pub const fn android_intent_flags(&self) -> i32 {
        let mut flags = 0;
        if self.no_history {
            flags |= FLAG_ACTIVITY_NO_HISTORY;
        }
        if self.exclude_from_recents {
            flags |= FLAG_ACTIVITY_EXCLUDE_FROM_RECENTS;
        }
        flags
    }
}

/// Configuration of a [`SettingsBridge`](crate::SettingsBridge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Channel the bridge is registered under.
    pub channel: String,
    /// Presentation of the settings screen.
    pub launch: LaunchOptions,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel: CHANNEL.to_owned(),
            launch: LaunchOptions::default(),
        }
    }
}

impl BridgeConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// Fails if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
