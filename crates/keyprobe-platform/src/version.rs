//! Android API levels.

use std::fmt;

/// Android API level as reported by `Build.VERSION.SDK_INT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SdkLevel(pub u32);

impl SdkLevel {
    /// Android 6.0 (Marshmallow).
    ///
    /// First level with `KeyguardManager#isDeviceSecure` and runtime
    /// fingerprint permissions.
    pub const M: SdkLevel = SdkLevel(23);

    /// Android 9 (Pie). First level with `USE_BIOMETRIC`.
    pub const P: SdkLevel = SdkLevel(28);

    /// Android 11.
    pub const R: SdkLevel = SdkLevel(30);

    /// Returns `true` if this level is `other` or newer.
    pub fn at_least(self, other: SdkLevel) -> bool {
        self >= other
    }
}

impl From<u32> for SdkLevel {
    fn from(level: u32) -> Self {
        SdkLevel(level)
    }
}

impl fmt::Display for SdkLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}
