//! Android device capability checks for keychain integrations.
//!
//! Implements:
//! - Biometric availability (strong class, fingerprint / face / iris hardware)
//! - Lock screen security, with the pre-API 23 keyguard fallback
//! - Biometric permission checks across permission models
//! - Android: JNI-backed framework queries

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod availability;
pub mod error;
pub mod mock;
pub mod traits;
pub mod version;

#[cfg(target_os = "android")]
pub mod android;

pub use availability::{
    is_device_secure, is_face_auth_available, is_fingerprint_auth_available,
    is_iris_auth_available, is_permissions_granted, is_strong_biometric_auth_available,
    supported_biometry_type, BiometryType, DeviceCapabilities,
};
pub use error::{Error, Result};
pub use traits::{
    Authenticators, BiometricStatus, DeviceServices, Permission, PermissionState, SystemFeature,
};
pub use version::SdkLevel;
