//! Device capability predicates.
//!
//! Each predicate is a single snapshot read through [`DeviceServices`],
//! gated on the API level where the framework surface differs. `Ok(false)`
//! covers both "absent" and "cannot be determined"; `Err` only means the
//! platform call itself failed.

use crate::error::Result;
use crate::traits::{Authenticators, DeviceServices, Permission, SystemFeature};
use crate::version::SdkLevel;
use serde::Serialize;

/// Returns `true` if class 3 biometrics are enrolled and usable.
pub fn is_strong_biometric_auth_available<D: DeviceServices + ?Sized>(device: &D) -> Result<bool> {
    let status = device.can_authenticate(Authenticators::BIOMETRIC_STRONG)?;
    tracing::debug!(?status, "strong biometric availability");
    Ok(status.is_success())
}

/// Returns `true` if the device declares fingerprint hardware.
pub fn is_fingerprint_auth_available<D: DeviceServices + ?Sized>(device: &D) -> Result<bool> {
    device.has_system_feature(SystemFeature::Fingerprint)
}

/// Returns `true` if the device declares face authentication hardware.
pub fn is_face_auth_available<D: DeviceServices + ?Sized>(device: &D) -> Result<bool> {
    device.has_system_feature(SystemFeature::Face)
}

/// Returns `true` if the device declares iris hardware.
pub fn is_iris_auth_available<D: DeviceServices + ?Sized>(device: &D) -> Result<bool> {
    device.has_system_feature(SystemFeature::Iris)
}

/// Returns `true` if the device has a secure lock screen.
///
/// On API 23+ this is `KeyguardManager#isDeviceSecure`. Older levels have no
/// equivalent, so `isKeyguardSecure` is used instead. That call also counts a
/// locked SIM, which is ignored when falling back to device credentials, so
/// on those levels the answer can be `true` without a usable PIN, pattern or
/// password.
pub fn is_device_secure<D: DeviceServices + ?Sized>(device: &D) -> Result<bool> {
    let sdk = device.sdk_level()?;

    if sdk.at_least(SdkLevel::M) {
        let secure = device.is_device_secure()?;
        tracing::debug!(%sdk, secure, "device secure");
        return Ok(secure);
    }

    let secure = device.is_keyguard_secure()?;
    tracing::warn!(%sdk, secure, "using isKeyguardSecure fallback, SIM lock counts as secure");
    Ok(secure)
}

/// Returns `true` if the app may use biometric prompts.
///
/// - Below API 23 there is no biometric permission model: always `false`.
/// - Without a secure keyguard: `false`.
/// - API 28+: `USE_BIOMETRIC` must be granted.
/// - API 23-27: `USE_FINGERPRINT` must be granted.
pub fn is_permissions_granted<D: DeviceServices + ?Sized>(device: &D) -> Result<bool> {
    let sdk = device.sdk_level()?;
    if !sdk.at_least(SdkLevel::M) {
        tracing::debug!(%sdk, "no biometric permissions before API 23");
        return Ok(false);
    }

    if !device.is_keyguard_secure()? {
        tracing::debug!(%sdk, "keyguard not secure");
        return Ok(false);
    }

    let permission = if sdk.at_least(SdkLevel::P) {
        Permission::UseBiometric
    } else {
        Permission::UseFingerprint
    };

    let state = device.check_self_permission(permission)?;
    tracing::debug!(%sdk, permission = permission.name(), ?state, "biometric permission");
    Ok(state.is_granted())
}

/// Biometric modality offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BiometryType {
    /// Fingerprint sensor.
    Fingerprint,

    /// Face authentication.
    Face,

    /// Iris scanner.
    Iris,
}

impl BiometryType {
    /// Name handed to JVM callers.
    pub fn as_str(self) -> &'static str {
        match self {
            BiometryType::Fingerprint => "Fingerprint",
            BiometryType::Face => "Face",
            BiometryType::Iris => "Iris",
        }
    }
}

/// Returns the biometry type usable for strong authentication, if any.
///
/// `None` unless strong biometrics are available. Otherwise the first declared
/// hardware in the order fingerprint, face, iris.
pub fn supported_biometry_type<D: DeviceServices + ?Sized>(
    device: &D,
) -> Result<Option<BiometryType>> {
    if !is_strong_biometric_auth_available(device)? {
        return Ok(None);
    }

    let kind = if is_fingerprint_auth_available(device)? {
        Some(BiometryType::Fingerprint)
    } else if is_face_auth_available(device)? {
        Some(BiometryType::Face)
    } else if is_iris_auth_available(device)? {
        Some(BiometryType::Iris)
    } else {
        None
    };

    Ok(kind)
}

/// Snapshot of every capability predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapabilities {
    /// API level at probe time.
    pub sdk_level: u32,
    /// [`is_strong_biometric_auth_available`].
    pub strong_biometric: bool,
    /// [`is_fingerprint_auth_available`].
    pub fingerprint: bool,
    /// [`is_face_auth_available`].
    pub face: bool,
    /// [`is_iris_auth_available`].
    pub iris: bool,
    /// [`is_device_secure`].
    pub device_secure: bool,
    /// [`is_permissions_granted`].
    pub permissions_granted: bool,
    /// [`supported_biometry_type`].
    pub biometry_type: Option<BiometryType>,
}

impl DeviceCapabilities {
    /// Runs every predicate once. The first platform error aborts the probe.
    pub fn probe<D: DeviceServices + ?Sized>(device: &D) -> Result<Self> {
        let strong_biometric = is_strong_biometric_auth_available(device)?;
        let fingerprint = is_fingerprint_auth_available(device)?;
        let face = is_face_auth_available(device)?;
        let iris = is_iris_auth_available(device)?;

        let biometry_type = if !strong_biometric {
            None
        } else if fingerprint {
            Some(BiometryType::Fingerprint)
        } else if face {
            Some(BiometryType::Face)
        } else if iris {
            Some(BiometryType::Iris)
        } else {
            None
        };

        Ok(Self {
            sdk_level: device.sdk_level()?.0,
            strong_biometric,
            fingerprint,
            face,
            iris,
            device_secure: is_device_secure(device)?,
            permissions_granted: is_permissions_granted(device)?,
            biometry_type,
        })
    }

    /// Returns `true` if a biometry type can be offered.
    pub fn supports_biometry(&self) -> bool {
        self.biometry_type.is_some()
    }
}
