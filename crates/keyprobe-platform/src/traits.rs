//! Platform abstraction for device capability queries.
//!
//! The capability predicates only talk to the device through
//! [`DeviceServices`], so they run unchanged against the Android framework
//! or against a mock.

use crate::error::Result;
use crate::version::SdkLevel;

/// Read-only view of the Android services the predicates consult.
///
/// Platform-specific implementations:
/// - Android: JNI calls into the framework (`AndroidDevice`)
/// - Testing: In-memory simulated device (`MockDevice`)
///
/// Every method is a single snapshot read of current OS state. A method
/// returns `Err` only when the platform call itself fails; an absent
/// capability is reported through the returned value.
pub trait DeviceServices: Send + Sync {
    /// Returns `Build.VERSION.SDK_INT`.
    fn sdk_level(&self) -> Result<SdkLevel>;

    /// Calls `BiometricManager#canAuthenticate` with the given authenticators.
    fn can_authenticate(&self, authenticators: Authenticators) -> Result<BiometricStatus>;

    /// Calls `PackageManager#hasSystemFeature`.
    fn has_system_feature(&self, feature: SystemFeature) -> Result<bool>;

    /// Calls `KeyguardManager#isDeviceSecure`.
    ///
    /// Only exists on API 23 and newer; callers gate on [`SdkLevel::M`].
    ///
    /// # Example
    ///
    /// ```
    /// use keyprobe_platform::mock::MockDevice;
    /// use keyprobe_platform::traits::DeviceServices;
    /// use keyprobe_platform::SdkLevel;
    ///
    /// let device = MockDevice::new(SdkLevel::R).with_device_secure(true);
    /// assert!(device.is_device_secure().unwrap());
    /// ```
    fn is_device_secure(&self) -> Result<bool>;

    /// Calls `KeyguardManager#isKeyguardSecure`.
    ///
    /// Also reports `true` for a locked SIM.
    fn is_keyguard_secure(&self) -> Result<bool>;

    /// Calls `Context#checkSelfPermission`.
    fn check_self_permission(&self, permission: Permission) -> Result<PermissionState>;
}

/// `BiometricManager.Authenticators` bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Authenticators(pub i32);

impl Authenticators {
    /// Class 3 biometrics.
    pub const BIOMETRIC_STRONG: Authenticators = Authenticators(0x000F);

    /// Class 2 biometrics (includes class 3).
    pub const BIOMETRIC_WEAK: Authenticators = Authenticators(0x00FF);

    /// PIN, pattern or password.
    pub const DEVICE_CREDENTIAL: Authenticators = Authenticators(0x8000);

    /// Raw bits passed to the framework.
    pub fn bits(self) -> i32 {
        self.0
    }
}

impl std::ops::BitOr for Authenticators {
    type Output = Authenticators;

    fn bitor(self, rhs: Self) -> Self::Output {
        Authenticators(self.0 | rhs.0)
    }
}

/// Result of `BiometricManager#canAuthenticate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiometricStatus {
    /// `BIOMETRIC_SUCCESS`: enrolled and usable.
    Success,

    /// `BIOMETRIC_ERROR_HW_UNAVAILABLE`.
    HardwareUnavailable,

    /// `BIOMETRIC_ERROR_NONE_ENROLLED`.
    NoneEnrolled,

    /// `BIOMETRIC_ERROR_NO_HARDWARE`.
    NoHardware,

    /// `BIOMETRIC_ERROR_SECURITY_UPDATE_REQUIRED`.
    SecurityUpdateRequired,

    /// `BIOMETRIC_ERROR_UNSUPPORTED`.
    Unsupported,

    /// `BIOMETRIC_STATUS_UNKNOWN`.
    Unknown,

    /// Code not known to this crate.
    Other(i32),
}

impl BiometricStatus {
    /// Maps a raw framework result code.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => BiometricStatus::Success,
            1 => BiometricStatus::HardwareUnavailable,
            11 => BiometricStatus::NoneEnrolled,
            12 => BiometricStatus::NoHardware,
            15 => BiometricStatus::SecurityUpdateRequired,
            -2 => BiometricStatus::Unsupported,
            -1 => BiometricStatus::Unknown,
            other => BiometricStatus::Other(other),
        }
    }

    /// Raw framework result code.
    pub fn code(self) -> i32 {
        match self {
            BiometricStatus::Success => 0,
            BiometricStatus::HardwareUnavailable => 1,
            BiometricStatus::NoneEnrolled => 11,
            BiometricStatus::NoHardware => 12,
            BiometricStatus::SecurityUpdateRequired => 15,
            BiometricStatus::Unsupported => -2,
            BiometricStatus::Unknown => -1,
            BiometricStatus::Other(code) => code,
        }
    }

    /// Returns `true` for [`BiometricStatus::Success`].
    pub fn is_success(self) -> bool {
        self == BiometricStatus::Success
    }
}

/// Hardware features looked up through `PackageManager#hasSystemFeature`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemFeature {
    /// `PackageManager.FEATURE_FINGERPRINT`.
    Fingerprint,

    /// `PackageManager.FEATURE_FACE`.
    Face,

    /// `PackageManager.FEATURE_IRIS`.
    Iris,
}

impl SystemFeature {
    /// Feature name as declared by the platform.
    pub fn name(self) -> &'static str {
        match self {
            SystemFeature::Fingerprint => "android.hardware.fingerprint",
            SystemFeature::Face => "android.hardware.biometrics.face",
            SystemFeature::Iris => "android.hardware.biometrics.iris",
        }
    }
}

/// Manifest permissions relevant to biometric prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `android.permission.USE_BIOMETRIC` (API 28+).
    UseBiometric,

    /// `android.permission.USE_FINGERPRINT` (API 23-27).
    UseFingerprint,
}

impl Permission {
    /// Fully qualified permission name.
    pub fn name(self) -> &'static str {
        match self {
            Permission::UseBiometric => "android.permission.USE_BIOMETRIC",
            Permission::UseFingerprint => "android.permission.USE_FINGERPRINT",
        }
    }
}

/// Result of `Context#checkSelfPermission`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionState {
    /// `PERMISSION_GRANTED`.
    Granted,

    /// `PERMISSION_DENIED`.
    Denied,
}

impl PermissionState {
    /// Maps a raw `checkSelfPermission` result. Anything but `0` is denied.
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }

    /// Returns `true` for [`PermissionState::Granted`].
    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biometric_status_codes() {
        for status in [
            BiometricStatus::Success,
            BiometricStatus::HardwareUnavailable,
            BiometricStatus::NoneEnrolled,
            BiometricStatus::NoHardware,
            BiometricStatus::SecurityUpdateRequired,
            BiometricStatus::Unsupported,
            BiometricStatus::Unknown,
        ] {
            assert_eq!(BiometricStatus::from_code(status.code()), status);
        }
        assert_eq!(BiometricStatus::from_code(42), BiometricStatus::Other(42));
    }

    #[test]
    fn test_only_success_is_success() {
        assert!(BiometricStatus::Success.is_success());
        assert!(!BiometricStatus::NoneEnrolled.is_success());
        assert!(!BiometricStatus::Other(0x1).is_success());
    }

    #[test]
    fn test_permission_state_from_code() {
        assert_eq!(PermissionState::from_code(0), PermissionState::Granted);
        assert_eq!(PermissionState::from_code(-1), PermissionState::Denied);
        assert_eq!(PermissionState::from_code(7), PermissionState::Denied);
    }

    #[test]
    fn test_authenticators_combine() {
        let both = Authenticators::BIOMETRIC_STRONG | Authenticators::DEVICE_CREDENTIAL;
        assert_eq!(both.bits(), 0x800F);
    }

    #[test]
    fn test_feature_names() {
        assert_eq!(SystemFeature::Fingerprint.name(), "android.hardware.fingerprint");
        assert_eq!(SystemFeature::Face.name(), "android.hardware.biometrics.face");
        assert_eq!(SystemFeature::Iris.name(), "android.hardware.biometrics.iris");
    }
}
