//! Native methods of `com.esimmanager.EsimBridge`.
#![allow(unsafe_code, non_snake_case)] // JNI symbols must be exported unmangled

use std::sync::OnceLock;

use android_logger::Config;
use esim_core::{EsimGateway, GatewaySettings};
use esim_host::{HostBridge, HostError, HostResponse};
use jni::JNIEnv;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jstring};
use log::LevelFilter;
use tracing::{error, info, warn};

use crate::jni_util::read_string;
use crate::platform::AndroidPlatform;
use crate::{LOG_TAG, runtime};

static BRIDGE: OnceLock<HostBridge> = OnceLock::new();

fn init_logging() {
    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag(LOG_TAG),
    );
}

fn load_settings(env: &mut JNIEnv<'_>, settings: JString<'_>) -> Result<GatewaySettings, String> {
    let raw = read_string(env, settings.into()).map_err(|e| e.to_string())?;
    if raw.trim().is_empty() {
        return Ok(GatewaySettings::default());
    }
    serde_json::from_str(&raw).map_err(|e| format!("invalid settings: {e}"))
}

fn init(env: &mut JNIEnv<'_>, context: &JObject<'_>, settings: JString<'_>) -> Result<(), String> {
    runtime::register(env, context).map_err(|e| e.to_string())?;
    if BRIDGE.get().is_some() {
        return Ok(());
    }
    let settings = load_settings(env, settings)?;
    let gateway =
        EsimGateway::new(AndroidPlatform::platform(), settings).map_err(|e| e.to_string())?;
    let _ = BRIDGE.set(HostBridge::new(gateway));
    info!("eSIM bridge ready");
    Ok(())
}

/// `static native boolean nativeInit(Context context, String settingsJson)`
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_esimmanager_EsimBridge_nativeInit<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
    settings: JString<'local>,
) -> jboolean {
    init_logging();
    match init(&mut env, &context, settings) {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            error!(error = %e, "nativeInit failed");
            JNI_FALSE
        }
    }
}

/// `static native void nativeSetActivity(Activity activity)`
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_esimmanager_EsimBridge_nativeSetActivity<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    activity: JObject<'local>,
) {
    if let Err(e) = runtime::set_foreground_activity(&mut env, &activity) {
        warn!(error = %e, "failed to track foreground activity");
    }
}

/// `static native String nativeCall(String requestJson)`
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_esimmanager_EsimBridge_nativeCall<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    request: JString<'local>,
) -> jstring {
    let response = match (BRIDGE.get(), read_string(&mut env, request.into())) {
        (Some(bridge), Ok(request)) => bridge.handle_json(&request),
        (None, _) => HostResponse::failure(HostError::new(
            "ERROR",
            "EsimBridge.nativeInit has not been called",
        ))
        .to_json(),
        (_, Err(e)) => HostResponse::failure(HostError::invalid_request(e.to_string())).to_json(),
    };

    match env.new_string(response) {
        Ok(text) => text.into_raw(),
        Err(e) => {
            error!(error = %e, "failed to return host response");
            std::ptr::null_mut()
        }
    }
}
