//! Android platform integration.
//!
//! Implements [`DeviceServices`] with JNI calls into the Android framework:
//! - `Build.VERSION.SDK_INT`
//! - `androidx.biometric.BiometricManager`
//! - `PackageManager#hasSystemFeature`
//! - `KeyguardManager`
//! - `Context#checkSelfPermission`
//!
//! `androidx` classes are resolved through the calling thread's class loader,
//! so queries must run on a thread that entered native code from Java.

use crate::error::{Error, Result};
use crate::traits::{
    Authenticators, BiometricStatus, DeviceServices, Permission, PermissionState, SystemFeature,
};
use crate::version::SdkLevel;
use jni::objects::{GlobalRef, JObject, JValue};
use jni::{AttachGuard, JNIEnv, JavaVM};

const BIOMETRIC_MANAGER: &str = "androidx/biometric/BiometricManager";
const KEYGUARD_SERVICE: &str = "keyguard";

/// Android device backed by an application `Context`.
pub struct AndroidDevice {
    vm: JavaVM,
    context: GlobalRef,
}

impl AndroidDevice {
    /// Wraps a VM handle and a global reference to an Android `Context`.
    pub fn new(vm: JavaVM, context: GlobalRef) -> Self {
        Self { vm, context }
    }

    /// Creates a device from a JNI entry point's environment and `Context`.
    ///
    /// # Errors
    ///
    /// - `Error::Jni` if the VM handle or global reference cannot be obtained
    pub fn from_env(env: &mut JNIEnv<'_>, context: &JObject<'_>) -> Result<Self> {
        let vm = env.get_java_vm()?;
        let context = env.new_global_ref(context)?;
        Ok(Self::new(vm, context))
    }

    fn env(&self) -> Result<AttachGuard<'_>> {
        Ok(self.vm.attach_current_thread()?)
    }

    /// Resolves `context.getSystemService("keyguard")`.
    fn keyguard_manager<'local>(&self, env: &mut JNIEnv<'local>) -> Result<JObject<'local>> {
        let name = env.new_string(KEYGUARD_SERVICE)?;
        let manager = env
            .call_method(
                self.context.as_obj(),
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&name)],
            )?
            .l()?;

        if manager.is_null() {
            return Err(Error::Unavailable("KeyguardManager".into()));
        }
        Ok(manager)
    }
}

impl DeviceServices for AndroidDevice {
    fn sdk_level(&self) -> Result<SdkLevel> {
        let mut env = self.env()?;
        let level = env
            .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
            .i()?;

        u32::try_from(level)
            .map(SdkLevel)
            .map_err(|_| Error::Platform(format!("negative SDK_INT: {}", level)))
    }

    fn can_authenticate(&self, authenticators: Authenticators) -> Result<BiometricStatus> {
        let mut env = self.env()?;
        let manager = env
            .call_static_method(
                BIOMETRIC_MANAGER,
                "from",
                "(Landroid/content/Context;)Landroidx/biometric/BiometricManager;",
                &[JValue::Object(self.context.as_obj())],
            )?
            .l()?;

        if manager.is_null() {
            return Err(Error::Unavailable("BiometricManager".into()));
        }

        let code = env
            .call_method(
                &manager,
                "canAuthenticate",
                "(I)I",
                &[JValue::Int(authenticators.bits())],
            )?
            .i()?;

        Ok(BiometricStatus::from_code(code))
    }

    fn has_system_feature(&self, feature: SystemFeature) -> Result<bool> {
        let mut env = self.env()?;
        let package_manager = env
            .call_method(
                self.context.as_obj(),
                "getPackageManager",
                "()Landroid/content/pm/PackageManager;",
                &[],
            )?
            .l()?;

        if package_manager.is_null() {
            return Err(Error::Unavailable("PackageManager".into()));
        }

        let name = env.new_string(feature.name())?;
        let present = env
            .call_method(
                &package_manager,
                "hasSystemFeature",
                "(Ljava/lang/String;)Z",
                &[JValue::Object(&name)],
            )?
            .z()?;

        Ok(present)
    }

    fn is_device_secure(&self) -> Result<bool> {
        let mut env = self.env()?;
        let manager = self.keyguard_manager(&mut env)?;
        Ok(env.call_method(&manager, "isDeviceSecure", "()Z", &[])?.z()?)
    }

    fn is_keyguard_secure(&self) -> Result<bool> {
        let mut env = self.env()?;
        let manager = self.keyguard_manager(&mut env)?;
        Ok(env.call_method(&manager, "isKeyguardSecure", "()Z", &[])?.z()?)
    }

    fn check_self_permission(&self, permission: Permission) -> Result<PermissionState> {
        let mut env = self.env()?;
        let name = env.new_string(permission.name())?;
        let code = env
            .call_method(
                self.context.as_obj(),
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&name)],
            )?
            .i()?;

        Ok(PermissionState::from_code(code))
    }
}
