//! Platform query errors.

use thiserror::Error;

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Platform errors.
///
/// A missing capability is never an error; these only describe a platform
/// call that could not be answered at all.
#[derive(Debug, Error)]
pub enum Error {
    /// Framework service could not be resolved.
    #[error("Platform service not available: {0}")]
    Unavailable(String),

    /// JNI call failed or the framework threw.
    #[error("JNI error: {0}")]
    Jni(String),

    /// Other backend fault.
    #[error("Platform error: {0}")]
    Platform(String),
}

#[cfg(target_os = "android")]
impl From<jni::errors::Error> for Error {
    fn from(err: jni::errors::Error) -> Self {
        Error::Jni(err.to_string())
    }
}
