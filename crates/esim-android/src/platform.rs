//! Gateway ports backed by Android system services.

use std::sync::Arc;

use esim_core::{
    ActivityPort, ApiLevel, ClipboardPort, EuiccState, IntentExtra, IntentSpec, Platform,
    PlatformError, SubscriptionRecord, TelephonyPort,
};
use jni::JNIEnv;
use jni::objects::{JObject, JValue};
use tracing::{debug, warn};

use crate::jni_util::{
    JniResultExt, char_sequence, describe, system_service, with_local_frame,
};
use crate::runtime;

const READ_PHONE_STATE: &str = "android.permission.READ_PHONE_STATE";
const FEATURE_TELEPHONY_EUICC: &str = "android.hardware.telephony.euicc";
const PERMISSION_GRANTED: i32 = 0;

const EUICC_SERVICE: &str = "euicc";
const SUBSCRIPTION_SERVICE: &str = "telephony_subscription_service";
const CLIPBOARD_SERVICE: &str = "clipboard";

// Local refs per subscription row: the info object, its carrier name and the
// name's string form.
const SUBSCRIPTION_FRAME: i32 = 8;

const INTENT_CLASS: &str = "android/content/Intent";
const PUT_STRING_EXTRA_SIG: &str = "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;";
const PUT_PARCELABLE_EXTRA_SIG: &str =
    "(Ljava/lang/String;Landroid/os/Parcelable;)Landroid/content/Intent;";

/// Stateless adapter; every call reads live platform state.
#[derive(Debug, Default, Clone, Copy)]
pub struct AndroidPlatform;

impl AndroidPlatform {
    pub fn platform() -> Platform {
        Platform::from_adapter(Arc::new(Self))
    }
}

impl TelephonyPort for AndroidPlatform {
    fn api_level(&self) -> ApiLevel {
        runtime::api_level()
    }

    fn has_phone_state_permission(&self) -> bool {
        runtime::with_env(|env, context| {
            let permission = env
                .new_string(READ_PHONE_STATE)
                .or_platform(env, "new_string")?;
            let status = env
                .call_method(
                    context,
                    "checkCallingOrSelfPermission",
                    "(Ljava/lang/String;)I",
                    &[JValue::Object(&permission)],
                )
                .and_then(|v| v.i())
                .or_platform(env, "checkCallingOrSelfPermission")?;
            Ok(status == PERMISSION_GRANTED)
        })
        .unwrap_or_else(|e| {
            warn!(error = %e, "permission check failed; treating as denied");
            false
        })
    }

    fn euicc_state(&self) -> Result<EuiccState, PlatformError> {
        runtime::with_env(|env, context| {
            let manager = system_service(env, context, EUICC_SERVICE)?;
            if manager.is_null() {
                return Ok(EuiccState::Absent);
            }
            let enabled = env
                .call_method(&manager, "isEnabled", "()Z", &[])
                .and_then(|v| v.z())
                .or_platform(env, "EuiccManager.isEnabled")?;
            Ok(if enabled {
                EuiccState::Enabled
            } else {
                EuiccState::Disabled
            })
        })
    }

    fn has_euicc_feature(&self) -> Result<bool, PlatformError> {
        runtime::with_env(|env, context| {
            let manager = env
                .call_method(
                    context,
                    "getPackageManager",
                    "()Landroid/content/pm/PackageManager;",
                    &[],
                )
                .and_then(|v| v.l())
                .or_platform(env, "getPackageManager")?;
            let feature = env
                .new_string(FEATURE_TELEPHONY_EUICC)
                .or_platform(env, "new_string")?;
            env.call_method(
                &manager,
                "hasSystemFeature",
                "(Ljava/lang/String;)Z",
                &[JValue::Object(&feature)],
            )
            .and_then(|v| v.z())
            .or_platform(env, "PackageManager.hasSystemFeature")
        })
    }

    fn active_subscriptions(&self) -> Result<Vec<SubscriptionRecord>, PlatformError> {
        // isEmbedded() is missing below API 28
        let read_embedded = self.api_level() >= ApiLevel::P;

        runtime::with_env(|env, context| {
            let manager = system_service(env, context, SUBSCRIPTION_SERVICE)?;
            if manager.is_null() {
                return Ok(Vec::new());
            }
            let list = env
                .call_method(
                    &manager,
                    "getActiveSubscriptionInfoList",
                    "()Ljava/util/List;",
                    &[],
                )
                .and_then(|v| v.l())
                .or_platform(env, "getActiveSubscriptionInfoList")?;
            if list.is_null() {
                return Ok(Vec::new());
            }

            let size = env
                .call_method(&list, "size", "()I", &[])
                .and_then(|v| v.i())
                .or_platform(env, "List.size")?;
            let mut records = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
            for index in 0..size {
                let record = with_local_frame(env, SUBSCRIPTION_FRAME, "PushLocalFrame", |env| {
                    let info = env
                        .call_method(&list, "get", "(I)Ljava/lang/Object;", &[JValue::Int(index)])
                        .and_then(|v| v.l())
                        .or_platform(env, "List.get")?;
                    if info.is_null() {
                        return Ok(None);
                    }
                    read_subscription(env, &info, read_embedded).map(Some)
                })?;
                records.extend(record);
            }
            debug!(count = records.len(), "read active subscriptions");
            Ok(records)
        })
    }
}

fn read_subscription(
    env: &mut JNIEnv<'_>,
    info: &JObject<'_>,
    read_embedded: bool,
) -> Result<SubscriptionRecord, PlatformError> {
    let int_getter = |env: &mut JNIEnv<'_>, name: &str| {
        env.call_method(info, name, "()I", &[])
            .and_then(|v| v.i())
            .or_platform(env, name)
    };

    let subscription_id = int_getter(env, "getSubscriptionId")?;
    let mcc = int_getter(env, "getMcc")?;
    let mnc = int_getter(env, "getMnc")?;

    let carrier = env
        .call_method(info, "getCarrierName", "()Ljava/lang/CharSequence;", &[])
        .and_then(|v| v.l())
        .or_platform(env, "getCarrierName")?;
    let carrier_name = char_sequence(env, carrier).or_platform(env, "CharSequence.toString")?;

    let embedded = if read_embedded {
        let embedded = env
            .call_method(info, "isEmbedded", "()Z", &[])
            .and_then(|v| v.z())
            .or_platform(env, "isEmbedded")?;
        Some(embedded)
    } else {
        None
    };

    Ok(SubscriptionRecord {
        subscription_id,
        carrier_name,
        mcc: mcc.to_string(),
        mnc: mnc.to_string(),
        embedded,
    })
}

impl ClipboardPort for AndroidPlatform {
    fn set_plain_text(&self, label: &str, text: &str) -> Result<(), PlatformError> {
        runtime::with_env(|env, context| {
            let manager = system_service(env, context, CLIPBOARD_SERVICE)?;
            if manager.is_null() {
                return Err(PlatformError::Unavailable("clipboard service".into()));
            }
            let label = env.new_string(label).or_platform(env, "new_string")?;
            let text = env.new_string(text).or_platform(env, "new_string")?;
            let clip = env
                .call_static_method(
                    "android/content/ClipData",
                    "newPlainText",
                    "(Ljava/lang/CharSequence;Ljava/lang/CharSequence;)Landroid/content/ClipData;",
                    &[JValue::Object(&label), JValue::Object(&text)],
                )
                .and_then(|v| v.l())
                .or_platform(env, "ClipData.newPlainText")?;
            env.call_method(
                &manager,
                "setPrimaryClip",
                "(Landroid/content/ClipData;)V",
                &[JValue::Object(&clip)],
            )
            .and_then(|v| v.v())
            .or_platform(env, "ClipboardManager.setPrimaryClip")
        })
    }
}

impl ActivityPort for AndroidPlatform {
    fn has_foreground_activity(&self) -> bool {
        runtime::foreground_activity().is_some()
    }

    fn start_activity(&self, intent: &IntentSpec) -> Result<(), PlatformError> {
        let activity = runtime::foreground_activity()
            .ok_or_else(|| PlatformError::Unavailable("foreground activity".into()))?;

        runtime::with_env(|env, _| {
            let built = build_intent(env, intent)
                .map_err(|e| PlatformError::Launch(format!("{}: {e}", intent.action)))?;
            env.call_method(
                activity.as_obj(),
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&built)],
            )
            .and_then(|v| v.v())
            .map_err(|e| PlatformError::Launch(format!("{}: {}", intent.action, describe(env, e))))
        })
    }
}

fn build_intent<'local>(
    env: &mut JNIEnv<'local>,
    target: &IntentSpec,
) -> Result<JObject<'local>, PlatformError> {
    let action = env.new_string(&target.action).or_platform(env, "new_string")?;
    let intent = env
        .new_object(
            INTENT_CLASS,
            "(Ljava/lang/String;)V",
            &[JValue::Object(&action)],
        )
        .or_platform(env, "new Intent")?;

    for (key, extra) in &target.extras {
        let key = env.new_string(key).or_platform(env, "new_string")?;
        match extra {
            IntentExtra::Text(value) => {
                let value = env.new_string(value).or_platform(env, "new_string")?;
                env.call_method(
                    &intent,
                    "putExtra",
                    PUT_STRING_EXTRA_SIG,
                    &[JValue::Object(&key), JValue::Object(&value)],
                )
                .or_platform(env, "Intent.putExtra(String)")?;
            }
            IntentExtra::DownloadableSubscription { activation_code } => {
                let code = env
                    .new_string(activation_code)
                    .or_platform(env, "new_string")?;
                let subscription = env
                    .call_static_method(
                        "android/telephony/euicc/DownloadableSubscription",
                        "forActivationCode",
                        "(Ljava/lang/String;)Landroid/telephony/euicc/DownloadableSubscription;",
                        &[JValue::Object(&code)],
                    )
                    .and_then(|v| v.l())
                    .or_platform(env, "DownloadableSubscription.forActivationCode")?;
                env.call_method(
                    &intent,
                    "putExtra",
                    PUT_PARCELABLE_EXTRA_SIG,
                    &[JValue::Object(&key), JValue::Object(&subscription)],
                )
                .or_platform(env, "Intent.putExtra(Parcelable)")?;
            }
        }
    }

    if target.flags != 0 {
        env.call_method(
            &intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(target.flags)],
        )
        .or_platform(env, "Intent.addFlags")?;
    }
    Ok(intent)
}
