//! Mock implementations for testing.
//!
//! Provides a deterministic, mutable simulated device for automated CI testing.

use crate::error::{Error, Result};
use crate::traits::{
    Authenticators, BiometricStatus, DeviceServices, Permission, PermissionState, SystemFeature,
};
use crate::version::SdkLevel;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// Simulated Android device.
///
/// Starts as a device without biometric hardware, without a lock screen and
/// without any granted permissions. State can be changed between calls to
/// simulate the user reconfiguring the device.
///
/// Platform calls that only exist on newer API levels fail when the
/// simulated level is too old, so tests catch missing version gates.
///
/// # Example
///
/// ```
/// use keyprobe_platform::mock::MockDevice;
/// use keyprobe_platform::traits::{Permission, SystemFeature};
/// use keyprobe_platform::{availability, SdkLevel};
///
/// let device = MockDevice::new(SdkLevel::R)
///     .with_feature(SystemFeature::Fingerprint)
///     .with_keyguard_secure(true)
///     .with_permission(Permission::UseBiometric);
///
/// assert!(availability::is_fingerprint_auth_available(&device).unwrap());
/// assert!(availability::is_permissions_granted(&device).unwrap());
/// ```
#[derive(Clone)]
pub struct MockDevice {
    state: Arc<RwLock<DeviceState>>,
    calls: Arc<RwLock<Vec<&'static str>>>,
}

#[derive(Debug, Clone)]
struct DeviceState {
    sdk_level: SdkLevel,
    biometric_status: BiometricStatus,
    last_authenticators: Option<Authenticators>,
    features: HashSet<SystemFeature>,
    device_secure: bool,
    keyguard_secure: bool,
    granted: HashSet<Permission>,
    fault: Option<String>,
}

impl MockDevice {
    /// Creates a bare device at the given API level.
    pub fn new(sdk_level: SdkLevel) -> Self {
        Self {
            state: Arc::new(RwLock::new(DeviceState {
                sdk_level,
                biometric_status: BiometricStatus::NoHardware,
                last_authenticators: None,
                features: HashSet::new(),
                device_secure: false,
                keyguard_secure: false,
                granted: HashSet::new(),
                fault: None,
            })),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Sets the `canAuthenticate` answer.
    pub fn with_biometric_status(self, status: BiometricStatus) -> Self {
        self.set_biometric_status(status);
        self
    }

    /// Declares a hardware feature.
    pub fn with_feature(self, feature: SystemFeature) -> Self {
        self.update(|s| {
            s.features.insert(feature);
        });
        self
    }

    /// Sets the `isDeviceSecure` answer.
    pub fn with_device_secure(self, secure: bool) -> Self {
        self.set_device_secure(secure);
        self
    }

    /// Sets the `isKeyguardSecure` answer.
    pub fn with_keyguard_secure(self, secure: bool) -> Self {
        self.set_keyguard_secure(secure);
        self
    }

    /// Grants a permission.
    pub fn with_permission(self, permission: Permission) -> Self {
        self.grant(permission);
        self
    }

    /// Simulates a configured secure lock screen (PIN, pattern or password).
    ///
    /// Both keyguard queries report secure.
    pub fn with_secure_lock_screen(self) -> Self {
        self.with_device_secure(true).with_keyguard_secure(true)
    }

    /// Changes the `canAuthenticate` answer.
    pub fn set_biometric_status(&self, status: BiometricStatus) {
        self.update(|s| s.biometric_status = status);
    }

    /// Changes the `isDeviceSecure` answer.
    pub fn set_device_secure(&self, secure: bool) {
        self.update(|s| s.device_secure = secure);
    }

    /// Changes the `isKeyguardSecure` answer.
    pub fn set_keyguard_secure(&self, secure: bool) {
        self.update(|s| s.keyguard_secure = secure);
    }

    /// Grants a permission.
    pub fn grant(&self, permission: Permission) {
        self.update(|s| {
            s.granted.insert(permission);
        });
    }

    /// Revokes a permission.
    pub fn revoke(&self, permission: Permission) {
        self.update(|s| {
            s.granted.remove(&permission);
        });
    }

    /// Makes every subsequent platform call fail with `Error::Platform`.
    pub fn fail_with(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|s| s.fault = Some(message));
    }

    /// Clears a fault set by [`MockDevice::fail_with`].
    pub fn recover(&self) {
        self.update(|s| s.fault = None);
    }

    /// Authenticators passed to the most recent `canAuthenticate` call.
    pub fn last_authenticators(&self) -> Option<Authenticators> {
        self.state.read().ok().and_then(|s| s.last_authenticators)
    }

    /// Names of the platform calls made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }

    fn update(&self, f: impl FnOnce(&mut DeviceState)) {
        if let Ok(mut state) = self.state.write() {
            f(&mut state);
        }
    }

    /// Records the call and returns a state snapshot, or the simulated fault.
    fn enter(&self, call: &'static str) -> Result<DeviceState> {
        if let Ok(mut calls) = self.calls.write() {
            calls.push(call);
        }

        let state = self
            .state
            .read()
            .map_err(|_| Error::Platform("mock device state poisoned".into()))?;

        if let Some(fault) = &state.fault {
            return Err(Error::Platform(fault.clone()));
        }

        Ok(state.clone())
    }
}

impl DeviceServices for MockDevice {
    fn sdk_level(&self) -> Result<SdkLevel> {
        Ok(self.enter("sdk_level")?.sdk_level)
    }

    fn can_authenticate(&self, authenticators: Authenticators) -> Result<BiometricStatus> {
        let state = self.enter("can_authenticate")?;
        self.update(|s| s.last_authenticators = Some(authenticators));
        Ok(state.biometric_status)
    }

    fn has_system_feature(&self, feature: SystemFeature) -> Result<bool> {
        Ok(self.enter("has_system_feature")?.features.contains(&feature))
    }

    fn is_device_secure(&self) -> Result<bool> {
        let state = self.enter("is_device_secure")?;
        if !state.sdk_level.at_least(SdkLevel::M) {
            return Err(Error::Unavailable(format!(
                "KeyguardManager#isDeviceSecure does not exist on {}",
                state.sdk_level
            )));
        }
        Ok(state.device_secure)
    }

    fn is_keyguard_secure(&self) -> Result<bool> {
        Ok(self.enter("is_keyguard_secure")?.keyguard_secure)
    }

    fn check_self_permission(&self, permission: Permission) -> Result<PermissionState> {
        let state = self.enter("check_self_permission")?;
        if !state.sdk_level.at_least(SdkLevel::M) {
            return Err(Error::Unavailable(format!(
                "Context#checkSelfPermission does not exist on {}",
                state.sdk_level
            )));
        }
        if state.granted.contains(&permission) {
            Ok(PermissionState::Granted)
        } else {
            Ok(PermissionState::Denied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_device_defaults() {
        let device = MockDevice::new(SdkLevel::R);

        assert_eq!(device.sdk_level().unwrap(), SdkLevel::R);
        assert_eq!(
            device.can_authenticate(Authenticators::BIOMETRIC_STRONG).unwrap(),
            BiometricStatus::NoHardware
        );
        assert!(!device.has_system_feature(SystemFeature::Fingerprint).unwrap());
        assert!(!device.is_device_secure().unwrap());
        assert!(!device.is_keyguard_secure().unwrap());
        assert_eq!(
            device.check_self_permission(Permission::UseBiometric).unwrap(),
            PermissionState::Denied
        );
    }

    #[test]
    fn test_mock_device_state_changes_are_visible() {
        let device = MockDevice::new(SdkLevel::R);
        let shared = device.clone();

        shared.set_device_secure(true);
        shared.grant(Permission::UseBiometric);
        assert!(device.is_device_secure().unwrap());
        assert!(device
            .check_self_permission(Permission::UseBiometric)
            .unwrap()
            .is_granted());

        shared.revoke(Permission::UseBiometric);
        assert!(!device
            .check_self_permission(Permission::UseBiometric)
            .unwrap()
            .is_granted());
    }

    #[test]
    fn test_mock_device_rejects_api_23_calls_on_older_levels() {
        let device = MockDevice::new(SdkLevel(22));

        assert!(matches!(device.is_device_secure(), Err(Error::Unavailable(_))));
        assert!(matches!(
            device.check_self_permission(Permission::UseFingerprint),
            Err(Error::Unavailable(_))
        ));
        assert!(device.is_keyguard_secure().is_ok());
    }

    #[test]
    fn test_mock_device_fault_and_recover() {
        let device = MockDevice::new(SdkLevel::R);
        device.fail_with("keyguard service died");

        let err = device.is_keyguard_secure().unwrap_err();
        assert!(err.to_string().contains("keyguard service died"));

        device.recover();
        assert!(device.is_keyguard_secure().is_ok());
    }

    #[test]
    fn test_mock_device_records_calls() {
        let device = MockDevice::new(SdkLevel::P);

        device.sdk_level().unwrap();
        device.can_authenticate(Authenticators::BIOMETRIC_WEAK).unwrap();

        assert_eq!(device.calls(), vec!["sdk_level", "can_authenticate"]);
        assert_eq!(device.last_authenticators(), Some(Authenticators::BIOMETRIC_WEAK));
    }
}
