//! JNI exports for `io.keyprobe.DeviceAvailability`.
//!
//! ```java
//! public final class DeviceAvailability {
//!     public static native boolean isStrongBiometricAuthAvailable(Context context);
//!     public static native boolean isFingerprintAuthAvailable(Context context);
//!     public static native boolean isFaceAuthAvailable(Context context);
//!     public static native boolean isIrisAuthAvailable(Context context);
//!     public static native boolean isDeviceSecure(Context context);
//!     public static native boolean isPermissionsGranted(Context context);
//!     public static native String getSupportedBiometryType(Context context);
//! }
//! ```

use crate::{biometry_name, guard, FfiError, FAULT_EXCEPTION_CLASS};
use jni::objects::{JClass, JObject};
use jni::sys::{jboolean, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use keyprobe_platform::android::AndroidDevice;
use keyprobe_platform::availability;

/// Leaves a Java exception pending for `err`.
///
/// An exception raised by the framework itself is kept as is.
fn raise(env: &mut JNIEnv<'_>, err: &FfiError) {
    tracing::warn!(error = %err, "capability check failed");

    if env.exception_check().unwrap_or(false) {
        return;
    }
    if let Err(throw_err) = env.throw_new(FAULT_EXCEPTION_CLASS, err.to_string()) {
        tracing::error!(error = %throw_err, "failed to throw {}", FAULT_EXCEPTION_CLASS);
    }
}

fn check<F>(mut env: JNIEnv<'_>, context: JObject<'_>, predicate: F) -> jboolean
where
    F: FnOnce(&AndroidDevice) -> keyprobe_platform::Result<bool>,
{
    let result = guard(|| {
        let device = AndroidDevice::from_env(&mut env, &context)?;
        Ok(predicate(&device)?)
    });

    match result {
        Ok(true) => JNI_TRUE,
        Ok(false) => JNI_FALSE,
        Err(err) => {
            raise(&mut env, &err);
            JNI_FALSE
        }
    }
}

/// `DeviceAvailability.isStrongBiometricAuthAvailable(Context)`.
#[no_mangle]
pub extern "system" fn Java_io_keyprobe_DeviceAvailability_isStrongBiometricAuthAvailable<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jboolean {
    check(env, context, availability::is_strong_biometric_auth_available)
}

/// `DeviceAvailability.isFingerprintAuthAvailable(Context)`.
#[no_mangle]
pub extern "system" fn Java_io_keyprobe_DeviceAvailability_isFingerprintAuthAvailable<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jboolean {
    check(env, context, availability::is_fingerprint_auth_available)
}

/// `DeviceAvailability.isFaceAuthAvailable(Context)`.
#[no_mangle]
pub extern "system" fn Java_io_keyprobe_DeviceAvailability_isFaceAuthAvailable<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jboolean {
    check(env, context, availability::is_face_auth_available)
}

/// `DeviceAvailability.isIrisAuthAvailable(Context)`.
#[no_mangle]
pub extern "system" fn Java_io_keyprobe_DeviceAvailability_isIrisAuthAvailable<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jboolean {
    check(env, context, availability::is_iris_auth_available)
}

/// `DeviceAvailability.isDeviceSecure(Context)`.
#[no_mangle]
pub extern "system" fn Java_io_keyprobe_DeviceAvailability_isDeviceSecure<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jboolean {
    check(env, context, availability::is_device_secure)
}

/// `DeviceAvailability.isPermissionsGranted(Context)`.
#[no_mangle]
pub extern "system" fn Java_io_keyprobe_DeviceAvailability_isPermissionsGranted<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jboolean {
    check(env, context, availability::is_permissions_granted)
}

/// `DeviceAvailability.getSupportedBiometryType(Context)`.
///
/// Returns `"Fingerprint"`, `"Face"`, `"Iris"` or `null`.
#[no_mangle]
pub extern "system" fn Java_io_keyprobe_DeviceAvailability_getSupportedBiometryType<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jstring {
    let result = guard(|| {
        let device = AndroidDevice::from_env(&mut env, &context)?;
        Ok(availability::supported_biometry_type(&device)?)
    });

    let kind = match result {
        Ok(kind) => kind,
        Err(err) => {
            raise(&mut env, &err);
            return JObject::null().into_raw();
        }
    };

    let Some(name) = biometry_name(kind) else {
        return JObject::null().into_raw();
    };

    match env.new_string(name) {
        Ok(name) => name.into_raw(),
        Err(err) => {
            raise(&mut env, &FfiError::Platform(err.into()));
            JObject::null().into_raw()
        }
    }
}
