//! Small helpers over the `jni` crate.

use esim_core::PlatformError;
use jni::JNIEnv;
use jni::errors::Error as JniError;
use jni::objects::{JObject, JString, JValue};

pub trait JniResultExt<T> {
    /// Convert a JNI failure, clearing and describing any pending Java exception.
    fn or_platform(self, env: &mut JNIEnv<'_>, operation: &str) -> Result<T, PlatformError>;
}

impl<T> JniResultExt<T> for jni::errors::Result<T> {
    fn or_platform(self, env: &mut JNIEnv<'_>, operation: &str) -> Result<T, PlatformError> {
        self.map_err(|e| PlatformError::call(operation, describe(env, e)))
    }
}

pub fn describe(env: &mut JNIEnv<'_>, error: JniError) -> String {
    match error {
        JniError::JavaException => {
            take_exception(env).unwrap_or_else(|| "Java exception".to_string())
        }
        other => other.to_string(),
    }
}

fn take_exception(env: &mut JNIEnv<'_>) -> Option<String> {
    let throwable = env.exception_occurred().ok()?;
    env.exception_clear().ok()?;
    if throwable.is_null() {
        return None;
    }
    let throwable = JObject::from(throwable);
    let text = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l());
    match text {
        Ok(text) => read_string(env, text).ok(),
        Err(_) => {
            // toString itself threw
            let _ = env.exception_clear();
            None
        }
    }
}

enum FrameError {
    Jni(JniError),
    Platform(PlatformError),
}

impl From<JniError> for FrameError {
    fn from(err: JniError) -> Self {
        Self::Jni(err)
    }
}

/// Run `f` inside a fresh JNI local frame.
///
/// Every local reference created by `f` is released when it returns, also
/// on error, so per-item work in a loop cannot fill the local ref table.
pub fn with_local_frame<T>(
    env: &mut JNIEnv<'_>,
    capacity: i32,
    operation: &str,
    f: impl FnOnce(&mut JNIEnv<'_>) -> Result<T, PlatformError>,
) -> Result<T, PlatformError> {
    let result = env.with_local_frame(capacity, |env| f(env).map_err(FrameError::Platform));
    match result {
        Ok(value) => Ok(value),
        Err(FrameError::Platform(err)) => Err(err),
        Err(FrameError::Jni(err)) => Err(PlatformError::call(operation, describe(env, err))),
    }
}

/// Read a `java.lang.String`, mapping null to an empty string.
pub fn read_string(env: &mut JNIEnv<'_>, object: JObject<'_>) -> Result<String, JniError> {
    if object.is_null() {
        return Ok(String::new());
    }
    let text = JString::from(object);
    let value: String = env.get_string(&text)?.into();
    Ok(value)
}

/// `CharSequence.toString()`, null-safe.
pub fn char_sequence(env: &mut JNIEnv<'_>, object: JObject<'_>) -> Result<String, JniError> {
    if object.is_null() {
        return Ok(String::new());
    }
    let text = env
        .call_method(&object, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    read_string(env, text)
}

/// `Context.getSystemService(name)`; null when the service does not exist.
pub fn system_service<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'_>,
    name: &str,
) -> Result<JObject<'local>, PlatformError> {
    let operation = format!("getSystemService({name})");
    let name = env.new_string(name).or_platform(env, &operation)?;
    env.call_method(
        context,
        "getSystemService",
        "(Ljava/lang/String;)Ljava/lang/Object;",
        &[JValue::Object(&name)],
    )
    .and_then(|v| v.l())
    .or_platform(env, &operation)
}
