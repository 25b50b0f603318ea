use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use log::{debug, warn};
use seawatch_channel::{ChannelRegistry, MethodCall, MethodCallHandler, MethodCodec, MethodResponse};

use crate::{
    BridgeConfig, LaunchOptions, OPEN_LOCATION_ACTIVATION, SettingsError, SettingsScreen,
    SystemSettingsHost,
};

/// The operating-system side of the bridge.
///
/// Implementations present a system settings screen. They may fail for any
/// reason; the bridge turns every failure into a `false` reply.
pub trait SettingsHost: Send + Sync {
    /// Present `screen` using `options`.
    ///
    /// # Errors
    /// Returns an error if the screen could not be launched.
    fn open_settings(
        &self,
        screen: SettingsScreen,
        options: &LaunchOptions,
    ) -> Result<(), SettingsError>;
}

impl<H: SettingsHost + ?Sized> SettingsHost for Arc<H> {
    fn open_settings(
        &self,
        screen: SettingsScreen,
        options: &LaunchOptions,
    ) -> Result<(), SettingsError> {
        (**self).open_settings(screen, options)
    }
}

/// Answers calls on the device settings channel.
#[derive(Debug)]
pub struct SettingsBridge<H = SystemSettingsHost> {
    host: H,
    config: BridgeConfig,
}

impl<H: SettingsHost> SettingsBridge<H> {
    /// Create a bridge with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, BridgeConfig::default())
    }

    /// Create a bridge with an explicit configuration.
    pub const fn with_config(host: H, config: BridgeConfig) -> Self {
        Self { host, config }
    }

    /// The channel this bridge answers on.
    pub fn channel(&self) -> &str {
        &self.config.channel
    }

    /// The host used to open settings screens.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Open the location-source settings screen.
    ///
    /// Returns `true` if the host launched the screen. Host errors and panics
    /// are absorbed and reported as `false`.
    pub fn open_location_activation(&self) -> bool {
        let options = &self.config.launch;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.host
                .open_settings(SettingsScreen::LocationSource, options)
        }));

        match outcome {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                warn!("could not open location settings: {err}");
                false
            }
            Err(_) => {
                warn!("settings host panicked while opening location settings");
                false
            }
        }
    }

    /// Install this bridge in `registry` under its channel.
    pub fn register<C: MethodCodec>(self, registry: &ChannelRegistry<C>)
    where
        H: 'static,
    {
        let channel = self.channel().to_owned();
        registry.register(channel, Arc::new(self));
    }
}

impl<H: SettingsHost> MethodCallHandler for SettingsBridge<H> {
    fn on_method_call(&self, call: &MethodCall) -> MethodResponse {
        debug!("{} <- {}", self.config.channel, call.method);
        match call.method.as_str() {
            OPEN_LOCATION_ACTIVATION => self.open_location_activation().into(),
            _ => MethodResponse::NotImplemented,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHANNEL;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Host that records every request and succeeds.
    #[derive(Debug, Default)]
    struct RecordingHost {
        requests: Mutex<Vec<(SettingsScreen, LaunchOptions)>>,
    }

    impl SettingsHost for RecordingHost {
        fn open_settings(
            &self,
            screen: SettingsScreen,
            options: &LaunchOptions,
        ) -> Result<(), SettingsError> {
            self.requests.lock().unwrap().push((screen, *options));
            Ok(())
        }
    }

    /// Host whose settings activity does not exist.
    #[derive(Debug)]
    struct MissingActivityHost;

    impl SettingsHost for MissingActivityHost {
        fn open_settings(&self, _: SettingsScreen, _: &LaunchOptions) -> Result<(), SettingsError> {
            Err(SettingsError::LaunchFailure(
                "android.content.ActivityNotFoundException".into(),
            ))
        }
    }

    #[derive(Debug)]
    struct UnsupportedHost;

    impl SettingsHost for UnsupportedHost {
        fn open_settings(&self, _: SettingsScreen, _: &LaunchOptions) -> Result<(), SettingsError> {
            Err(SettingsError::NotSupported)
        }
    }

    #[derive(Debug)]
    struct PanickingHost;

    impl SettingsHost for PanickingHost {
        fn open_settings(&self, _: SettingsScreen, _: &LaunchOptions) -> Result<(), SettingsError> {
            panic!("host blew up");
        }
    }

    /// Host that fails every other call.
    #[derive(Debug, Default)]
    struct FlakyHost {
        calls: AtomicUsize,
    }

    impl SettingsHost for FlakyHost {
        fn open_settings(&self, _: SettingsScreen, _: &LaunchOptions) -> Result<(), SettingsError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                Ok(())
            } else {
                Err(SettingsError::NotSupported)
            }
        }
    }

    fn call(method: &str) -> MethodCall {
        MethodCall::new(method)
    }

    #[test]
    fn healthy_host_replies_true() {
        let bridge = SettingsBridge::new(RecordingHost::default());
        let response = bridge.on_method_call(&call(OPEN_LOCATION_ACTIVATION));
        assert_eq!(response, MethodResponse::from(true));

        let requests = bridge.host().requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![(SettingsScreen::LocationSource, LaunchOptions::default())]
        );
    }

    #[test]
    fn missing_settings_activity_replies_false() {
        let bridge = SettingsBridge::new(MissingActivityHost);
        let response = bridge.on_method_call(&call(OPEN_LOCATION_ACTIVATION));
        assert_eq!(response, MethodResponse::from(false));
    }

    #[test]
    fn unsupported_platform_replies_false() {
        let bridge = SettingsBridge::new(UnsupportedHost);
        assert!(!bridge.open_location_activation());
    }

    #[test]
    fn panicking_host_replies_false() {
        let bridge = SettingsBridge::new(PanickingHost);
        assert!(!bridge.open_location_activation());
        // The bridge is still usable afterwards.
        assert!(!bridge.open_location_activation());
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let bridge = SettingsBridge::new(RecordingHost::default());
        let response = bridge.on_method_call(&call("unknownMethod"));
        assert!(response.is_not_implemented());
        assert!(bridge.host().requests.lock().unwrap().is_empty());
    }

    #[test]
    fn method_names_are_case_sensitive() {
        let bridge = SettingsBridge::new(RecordingHost::default());
        let response = bridge.on_method_call(&call("OpenLocationActivation"));
        assert!(response.is_not_implemented());
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let bridge = SettingsBridge::new(RecordingHost::default());
        let plain = bridge.on_method_call(&call(OPEN_LOCATION_ACTIVATION));
        let with_args = bridge.on_method_call(
            &call(OPEN_LOCATION_ACTIVATION).with_arguments(json!({"force": true, "n": [1, 2]})),
        );
        assert_eq!(plain, with_args);

        let requests = bridge.host().requests.lock().unwrap();
        assert_eq!(requests[0], requests[1]);
    }

    #[test]
    fn repeated_calls_are_independent() {
        let bridge = SettingsBridge::new(RecordingHost::default());
        assert!(bridge.open_location_activation());
        assert!(bridge.open_location_activation());
        assert_eq!(bridge.host().requests.lock().unwrap().len(), 2);

        // Results follow the host state of each call, nothing carries over.
        let flaky = SettingsBridge::new(FlakyHost::default());
        assert!(flaky.open_location_activation());
        assert!(!flaky.open_location_activation());
        assert!(flaky.open_location_activation());
    }

    #[test]
    fn launch_options_are_passed_to_the_host() {
        let config = BridgeConfig {
            launch: LaunchOptions {
                no_history: false,
                exclude_from_recents: true,
            },
            ..BridgeConfig::default()
        };
        let bridge = SettingsBridge::with_config(RecordingHost::default(), config.clone());
        assert!(bridge.open_location_activation());
        assert_eq!(bridge.host().requests.lock().unwrap()[0].1, config.launch);
    }

    #[test]
    fn registered_bridge_answers_encoded_calls() {
        let registry = ChannelRegistry::new();
        SettingsBridge::new(RecordingHost::default()).register(&registry);
        assert!(registry.is_registered(CHANNEL));

        let reply = registry.dispatch(CHANNEL, br#"{"method":"openLocationActivation"}"#);
        assert_eq!(reply, b"[true]");

        let reply = registry.dispatch(CHANNEL, br#"{"method":"unknownMethod","args":null}"#);
        assert!(reply.is_empty());
    }

    #[test]
    fn registered_bridge_reports_failure_as_false() {
        let registry = ChannelRegistry::new();
        SettingsBridge::new(MissingActivityHost).register(&registry);

        let response = registry
            .invoke(CHANNEL, &call(OPEN_LOCATION_ACTIVATION))
            .unwrap();
        assert_eq!(response.as_bool(), Some(false));
    }

    #[test]
    fn bridge_is_only_reachable_on_its_channel() {
        let registry = ChannelRegistry::new();
        SettingsBridge::new(RecordingHost::default()).register(&registry);

        let response = registry
            .invoke("it.unibo.csr.seawatch/other", &call(OPEN_LOCATION_ACTIVATION))
            .unwrap();
        assert!(response.is_not_implemented());
    }

    #[test]
    fn custom_channel_from_config() {
        let config = BridgeConfig::from_json(r#"{"channel":"test/settings"}"#).unwrap();
        let registry = ChannelRegistry::new();
        let bridge = SettingsBridge::with_config(RecordingHost::default(), config);
        assert_eq!(bridge.channel(), "test/settings");
        bridge.register(&registry);

        assert!(registry.is_registered("test/settings"));
        assert!(!registry.is_registered(CHANNEL));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_calls_do_not_interfere() {
        let host = Arc::new(RecordingHost::default());
        let bridge = Arc::new(SettingsBridge::new(Arc::clone(&host)));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let bridge = Arc::clone(&bridge);
                tokio::task::spawn_blocking(move || {
                    bridge.on_method_call(&MethodCall::new(OPEN_LOCATION_ACTIVATION))
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), MethodResponse::from(true));
        }
        assert_eq!(host.requests.lock().unwrap().len(), 16);
    }
}
