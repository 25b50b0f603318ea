//! Android settings launcher using JNI.
//!
//! The host `MainActivity` hands itself to [`init`] once it is created and
//! forwards channel messages to `nativeHandleMessage`. Settings screens are
//! opened with `Activity.startActivity` on that Activity.

use std::sync::{OnceLock, PoisonError, RwLock};

use jni::objects::{GlobalRef, JByteArray, JClass, JObject, JString, JValue};
use jni::sys::{jbyteArray, jint};
use jni::{JNIEnv, JavaVM};
use log::{LevelFilter, error};
use seawatch_channel::ChannelRegistry;

use crate::{LaunchOptions, SettingsBridge, SettingsError, SettingsScreen, SystemSettingsHost};

const LOG_TAG: &str = "seawatch";

/// Error code replied when the JNI arguments of a message cannot be read.
pub const JNI_ERROR: &str = "jni_error";

static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();
/// Replaced every time the Activity is recreated.
static ACTIVITY: RwLock<Option<GlobalRef>> = RwLock::new(None);
static REGISTRY: OnceLock<ChannelRegistry> = OnceLock::new();

/// Channels answered by native code.
pub fn registry() -> &'static ChannelRegistry {
    REGISTRY.get_or_init(|| {
        let registry = ChannelRegistry::new();
        SettingsBridge::new(SystemSettingsHost).register(&registry);
        registry
    })
}

/// Capture the VM and the Activity settings screens are launched from.
///
/// # Errors
/// Fails if the VM or a global reference to `activity` cannot be obtained.
pub fn init(env: &mut JNIEnv, activity: &JObject) -> Result<(), SettingsError> {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag(LOG_TAG),
    );

    if JAVA_VM.get().is_none() {
        let vm = env.get_java_vm().map_err(map_jni_error)?;
        let _ = JAVA_VM.set(vm);
    }

    let global = env.new_global_ref(activity).map_err(map_jni_error)?;
    *ACTIVITY.write().unwrap_or_else(PoisonError::into_inner) = Some(global);

    registry();
    Ok(())
}

fn map_jni_error(err: jni::errors::Error) -> SettingsError {
    SettingsError::LaunchFailure(format!("JNI error: {err}"))
}

pub(crate) fn open_settings(
    screen: SettingsScreen,
    options: &LaunchOptions,
) -> Result<(), SettingsError> {
    let vm = JAVA_VM
        .get()
        .ok_or_else(|| SettingsError::LaunchFailure("JavaVM not initialized".into()))?;

    let activity = ACTIVITY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or_else(|| SettingsError::LaunchFailure("Activity not initialized".into()))?;

    let mut env = vm.attach_current_thread().map_err(map_jni_error)?;
    open_settings_with_activity(&mut env, activity.as_obj(), screen, options)
}

/// Open `screen` from `activity` on the calling JNI thread.
///
/// A Java exception thrown by `startActivity` is cleared and returned as
/// [`SettingsError::LaunchFailure`].
///
/// # Errors
/// Fails if the Intent cannot be built or the Activity refuses to start it.
pub fn open_settings_with_activity(
    env: &mut JNIEnv,
    activity: &JObject,
    screen: SettingsScreen,
    options: &LaunchOptions,
) -> Result<(), SettingsError> {
    start_settings_activity(env, activity, screen, options).map_err(|err| {
        let reason = take_exception(env).unwrap_or_else(|| err.to_string());
        SettingsError::LaunchFailure(reason)
    })
}

fn start_settings_activity(
    env: &mut JNIEnv,
    activity: &JObject,
    screen: SettingsScreen,
    options: &LaunchOptions,
) -> jni::errors::Result<()> {
    let action = env.new_string(screen.android_action())?;
    let intent = env.new_object(
        "android/content/Intent",
        "(Ljava/lang/String;)V",
        &[JValue::Object(&action)],
    )?;

    let flags: jint = options.android_intent_flags();
    if flags != 0 {
        env.call_method(
            &intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(flags)],
        )?;
    }

    env.call_method(
        activity,
        "startActivity",
        "(Landroid/content/Intent;)V",
        &[JValue::Object(&intent)],
    )?;
    Ok(())
}

/// Clear a pending Java exception and describe it.
fn take_exception(env: &mut JNIEnv) -> Option<String> {
    if !env.exception_check().unwrap_or(false) {
        return None;
    }

    let throwable = env.exception_occurred().ok();
    let _ = env.exception_clear();
    let throwable = JObject::from(throwable?);

    let description = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .ok()?;
    let description = JString::from(description);
    let description = env.get_string(&description).ok()?;
    Some(description.into())
}

fn handle_message(
    env: &mut JNIEnv,
    channel: &JString,
    message: JByteArray,
) -> jni::errors::Result<Vec<u8>> {
    let channel: String = env.get_string(channel)?.into();
    let message = env.convert_byte_array(message)?;
    Ok(registry().dispatch(&channel, &message))
}

// JNI exports for `it.unibo.csr.seawatch.MainActivity` (companion object,
// `@JvmStatic external fun`).

/// `nativeInit(activity: Activity)`
#[unsafe(no_mangle)]
pub extern "system" fn Java_it_unibo_csr_seawatch_MainActivity_nativeInit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
) {
    if let Err(err) = init(&mut env, &activity) {
        error!("failed to initialize device settings bridge: {err}");
    }
}

/// `nativeHandleMessage(channel: String, message: ByteArray): ByteArray`
///
/// Returns the encoded reply; an empty array means "not implemented". A
/// message whose arguments cannot be read gets a [`JNI_ERROR`] error reply.
#[unsafe(no_mangle)]
pub extern "system" fn Java_it_unibo_csr_seawatch_MainActivity_nativeHandleMessage<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    channel: JString<'local>,
    message: JByteArray<'local>,
) -> jbyteArray {
    let reply = handle_message(&mut env, &channel, message).unwrap_or_else(|err| {
        error!("failed to read channel message: {err}");
        let reason = take_exception(&mut env).unwrap_or_else(|| err.to_string());
        registry().error_reply(JNI_ERROR, reason)
    });

    match env.byte_array_from_slice(&reply) {
        Ok(array) => array.into_raw(),
        Err(err) => {
            error!("failed to allocate channel reply: {err}");
            std::ptr::null_mut()
        }
    }
}
