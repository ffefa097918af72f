//! Streaming wrapper around the unaligned adapter.
//!
//! [`UnalignedStream`] keeps a cursor over an [`UnalignedBlockDevice`] and
//! implements the `embedded_io_async` Read/Write/Seek traits on top of it.
//!
//! [`UnalignedBlockDevice`]: crate::UnalignedBlockDevice

mod unaligned_stream;
mod embedded_io_impl;

pub use unaligned_stream::UnalignedStream;

use crate::domain::UnalignedError;
use core::fmt;

/// Unified I/O error type for streaming operations.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError<E> {
    /// Error from the adapter or the device behind it.
    Adapter(UnalignedError<E>),
    /// A write was attempted at or past the end of the device.
    OutOfBounds,
    /// Seek target is before the start of the stream or overflows.
    InvalidSeek,
}

impl<E> From<UnalignedError<E>> for StreamError<E> {
    fn from(e: UnalignedError<E>) -> Self {
        Self::Adapter(e)
    }
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adapter(e) => write!(f, "{}", e),
            Self::OutOfBounds => write!(f, "Operation would exceed storage bounds"),
            Self::InvalidSeek => write!(f, "Invalid seek position"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for StreamError<E> {}

// Implement embedded_io_async::Error so our streams can be used with embedded_io_async
impl<E: fmt::Debug + fmt::Display> embedded_io_async::Error for StreamError<E> {
    fn kind(&self) -> embedded_io_async::ErrorKind {
        match self {
            Self::Adapter(UnalignedError::NoMemory) => embedded_io_async::ErrorKind::OutOfMemory,
            Self::Adapter(UnalignedError::OutOfBounds { .. }) => {
                embedded_io_async::ErrorKind::InvalidInput
            }
            Self::Adapter(_) => embedded_io_async::ErrorKind::Other,
            Self::OutOfBounds => embedded_io_async::ErrorKind::InvalidInput,
            Self::InvalidSeek => embedded_io_async::ErrorKind::InvalidInput,
        }
    }
}
