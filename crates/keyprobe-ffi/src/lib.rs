//! Foreign function interface bindings for keyprobe.
//!
//! Exposes the capability predicates to a JVM host through JNI on the
//! `io.keyprobe.DeviceAvailability` class. Every export takes an Android
//! `Context` and maps a platform fault to a pending Java exception.

#![warn(missing_docs)]

use keyprobe_platform::BiometryType;
use std::panic::{self, AssertUnwindSafe};

#[cfg(target_os = "android")]
pub mod jni_exports;

/// Java exception class thrown for faults that did not already raise one.
pub const FAULT_EXCEPTION_CLASS: &str = "java/lang/IllegalStateException";

/// FFI error type.
#[derive(Debug, thiserror::Error)]
pub enum FfiError {
    /// Platform query failed.
    #[error("Platform error: {0}")]
    Platform(#[from] keyprobe_platform::Error),

    /// Native code panicked.
    #[error("Native panic: {0}")]
    Panic(String),
}

/// Runs `f`, turning a panic into [`FfiError::Panic`].
///
/// Unwinding out of an `extern "system"` function aborts the host process.
pub fn guard<T>(f: impl FnOnce() -> Result<T, FfiError>) -> Result<T, FfiError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(%message, "panic in native capability check");
            Err(FfiError::Panic(message))
        }
    }
}

/// Name returned to Java for a biometry type, `None` maps to `null`.
pub fn biometry_name(kind: Option<BiometryType>) -> Option<&'static str> {
    kind.map(BiometryType::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyprobe_platform::mock::MockDevice;
    use keyprobe_platform::{BiometricStatus, SdkLevel, SystemFeature};

    #[test]
    fn test_guard_passes_value_through() {
        let device = MockDevice::new(SdkLevel::R).with_secure_lock_screen();
        let result = guard(|| Ok(keyprobe_platform::is_device_secure(&device)?));
        assert!(result.unwrap());
    }

    #[test]
    fn test_guard_converts_platform_error() {
        let device = MockDevice::new(SdkLevel::R);
        device.fail_with("package manager gone");

        let err = guard(|| Ok(keyprobe_platform::is_face_auth_available(&device)?)).unwrap_err();
        assert!(matches!(err, FfiError::Platform(_)));
        assert!(err.to_string().contains("package manager gone"));
    }

    #[test]
    fn test_guard_catches_panic() {
        let err = guard::<bool>(|| panic!("boom")).unwrap_err();
        match err {
            FfiError::Panic(message) => assert_eq!(message, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_biometry_name() {
        let device = MockDevice::new(SdkLevel::R)
            .with_biometric_status(BiometricStatus::Success)
            .with_feature(SystemFeature::Fingerprint);

        let kind = keyprobe_platform::supported_biometry_type(&device).unwrap();
        assert_eq!(biometry_name(kind), Some("Fingerprint"));
        assert_eq!(biometry_name(None), None);
    }
}
