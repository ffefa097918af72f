//! Integer status codes.
//!
//! For callers that speak the classic block-device return-code protocol:
//! zero for success, negative values for failures. Adapter-level failures
//! get codes of their own; device codes pass through untouched.

use crate::domain::UnalignedError;

/// Operation succeeded.
pub const STATUS_OK: i32 = 0;

/// The staging buffer could not be allocated.
pub const STATUS_NO_MEMORY: i32 = -4002;

/// The adapter has not been initialized.
pub const STATUS_NOT_INITIALIZED: i32 = -4003;

/// The request reaches past the end of the device.
pub const STATUS_OUT_OF_BOUNDS: i32 = -4004;

/// The device reported an unusable geometry.
pub const STATUS_INVALID_GEOMETRY: i32 = -4005;

/// Errors that can be reported as an integer status code.
pub trait StatusCode {
    /// The (negative) status code for this error.
    fn status_code(&self) -> i32;
}

/// Raw driver codes are reported as-is.
impl StatusCode for i32 {
    fn status_code(&self) -> i32 {
        *self
    }
}

impl<E: StatusCode> StatusCode for UnalignedError<E> {
    fn status_code(&self) -> i32 {
        match self {
            Self::NotInitialized => STATUS_NOT_INITIALIZED,
            Self::NoMemory => STATUS_NO_MEMORY,
            Self::OutOfBounds { .. } => STATUS_OUT_OF_BOUNDS,
            Self::InvalidGeometry(_) => STATUS_INVALID_GEOMETRY,
            Self::Device(e) => e.status_code(),
        }
    }
}

/// Collapse a result into a status code.
///
/// # Examples
///
/// ```
/// use fatrs_unaligned::UnalignedError;
/// use fatrs_unaligned::status::{status_of, STATUS_NOT_INITIALIZED, STATUS_OK};
///
/// let ok: Result<(), UnalignedError<i32>> = Ok(());
/// assert_eq!(status_of(&ok), STATUS_OK);
///
/// let err: Result<(), UnalignedError<i32>> = Err(UnalignedError::NotInitialized);
/// assert_eq!(status_of(&err), STATUS_NOT_INITIALIZED);
/// ```
pub fn status_of<T, E: StatusCode>(result: &Result<T, E>) -> i32 {
    match result {
        Ok(_) => STATUS_OK,
        Err(e) => e.status_code(),
    }
}
