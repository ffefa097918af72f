//! Domain-level errors.
//!
//! `NotInitialized`, `NoMemory`, `OutOfBounds` and `InvalidGeometry` are
//! raised by the adapter itself without touching the device. Device failures
//! come through the port error type and are passed on unchanged.

use crate::domain::value_objects::GeometryError;
use core::fmt;

/// Errors returned by [`UnalignedBlockDevice`](crate::UnalignedBlockDevice).
#[derive(Debug)]
#[non_exhaustive]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnalignedError<E> {
    /// An operation was attempted before a successful `init`.
    NotInitialized,

    /// The staging buffer could not be allocated during `init`.
    NoMemory,

    /// The request reaches past the end of the device.
    OutOfBounds {
        /// Start address of the request.
        addr: u64,
        /// Length of the request in bytes.
        len: u64,
        /// Total size of the device in bytes.
        total: u64,
    },

    /// The device reported a page size or total size the adapter can't use.
    InvalidGeometry(GeometryError),

    /// Error from the underlying device, passed through verbatim.
    ///
    /// In multi-page operations this is the first failure; pages handled
    /// before it are not rolled back.
    Device(E),
}

impl<E> UnalignedError<E> {
    /// The device error, if this error came from the device.
    pub fn device_error(&self) -> Option<&E> {
        match self {
            Self::Device(e) => Some(e),
            _ => None,
        }
    }

    /// Consume the error and return the device error, if any.
    pub fn into_device_error(self) -> Option<E> {
        match self {
            Self::Device(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for UnalignedError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "Block device adapter is not initialized"),
            Self::NoMemory => write!(f, "Could not allocate the page staging buffer"),
            Self::OutOfBounds { addr, len, total } => write!(
                f,
                "Request of {} bytes at {} exceeds device size {}",
                len, addr, total
            ),
            Self::InvalidGeometry(e) => write!(f, "Invalid device geometry: {}", e),
            Self::Device(e) => write!(f, "Device error: {}", e),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for UnalignedError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidGeometry(e) => Some(e),
            _ => None,
        }
    }
}

// Note: no blanket From<E> for UnalignedError<E>; device results are mapped
// with `map_err(UnalignedError::Device)` at each call site.
