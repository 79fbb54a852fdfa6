//! Process-wide JVM handles.
//!
//! The application context is registered once by `nativeInit`; the
//! foreground activity is replaced every time the host reports a change.

use std::sync::{Mutex, OnceLock, PoisonError};

use esim_core::{ApiLevel, PlatformError};
use jni::objects::{GlobalRef, JObject};
use jni::{JNIEnv, JavaVM};
use tracing::{debug, info};

use crate::jni_util::JniResultExt;

struct Registration {
    vm: JavaVM,
    context: GlobalRef,
    api_level: ApiLevel,
}

static REGISTRATION: OnceLock<Registration> = OnceLock::new();
static FOREGROUND_ACTIVITY: Mutex<Option<GlobalRef>> = Mutex::new(None);

/// Remember the VM and the application context of `context`.
///
/// Later registrations are ignored.
pub fn register(env: &mut JNIEnv<'_>, context: &JObject<'_>) -> Result<(), PlatformError> {
    if REGISTRATION.get().is_some() {
        debug!("runtime already registered");
        return Ok(());
    }

    let vm = env.get_java_vm().or_platform(env, "GetJavaVM")?;
    let application = env
        .call_method(
            context,
            "getApplicationContext",
            "()Landroid/content/Context;",
            &[],
        )
        .and_then(|v| v.l())
        .or_platform(env, "getApplicationContext")?;
    let context = if application.is_null() {
        env.new_global_ref(context)
    } else {
        env.new_global_ref(&application)
    }
    .or_platform(env, "NewGlobalRef(context)")?;

    let sdk_int = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .and_then(|v| v.i())
        .or_platform(env, "Build.VERSION.SDK_INT")?;
    let api_level = ApiLevel(u32::try_from(sdk_int).unwrap_or(0));

    info!(%api_level, "registered Android runtime");
    let _ = REGISTRATION.set(Registration {
        vm,
        context,
        api_level,
    });
    Ok(())
}

/// SDK level of the device, or level 0 before registration.
pub fn api_level() -> ApiLevel {
    REGISTRATION.get().map_or(ApiLevel(0), |r| r.api_level)
}

/// Run `f` with an attached env and the application context.
pub fn with_env<R>(
    f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<R, PlatformError>,
) -> Result<R, PlatformError> {
    let registration = REGISTRATION.get().ok_or_else(|| {
        PlatformError::Unavailable("Android runtime not registered; call nativeInit".into())
    })?;
    let mut env = registration
        .vm
        .attach_current_thread()
        .map_err(|e| PlatformError::call("AttachCurrentThread", e.to_string()))?;
    f(&mut env, registration.context.as_obj())
}

/// Replace the tracked foreground activity; a null object clears it.
pub fn set_foreground_activity(
    env: &mut JNIEnv<'_>,
    activity: &JObject<'_>,
) -> Result<(), PlatformError> {
    let next = if activity.is_null() {
        None
    } else {
        Some(
            env.new_global_ref(activity)
                .or_platform(env, "NewGlobalRef(activity)")?,
        )
    };
    debug!(present = next.is_some(), "foreground activity changed");
    *FOREGROUND_ACTIVITY
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = next;
    Ok(())
}

pub fn foreground_activity() -> Option<GlobalRef> {
    FOREGROUND_ACTIVITY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
