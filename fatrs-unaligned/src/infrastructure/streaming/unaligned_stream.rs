//! Cursor-based stream over an unaligned adapter.

use super::StreamError;
use crate::domain::{PageDevice, UnalignedBlockDevice, UnalignedError};
use embedded_io_async::SeekFrom;

/// Byte stream over an [`UnalignedBlockDevice`].
///
/// The stream tracks a position and forwards every read and write to the
/// adapter at that position, so the adapter's page cache carries over between
/// consecutive calls. Reads stop at the end of the device. Writes are truncated
/// at the end of the device and fail once the position reaches it.
///
/// # Example
///
/// ```ignore
/// use embedded_io_async::{Read, Seek, SeekFrom, Write};
/// use fatrs_unaligned::{UnalignedBlockDevice, UnalignedStream};
///
/// let mut adapter = UnalignedBlockDevice::new(device);
/// adapter.init().await?;
///
/// let mut stream = UnalignedStream::new(adapter);
/// stream.write_all(b"config v2").await?;
/// stream.seek(SeekFrom::Start(0)).await?;
/// ```
#[derive(Debug)]
pub struct UnalignedStream<D> {
    device: UnalignedBlockDevice<D>,
    position: u64,
}

impl<D: PageDevice> UnalignedStream<D> {
    /// Wrap an adapter. The stream starts at position 0.
    ///
    /// The adapter may be initialized before or after wrapping; operations on
    /// an uninitialized adapter fail with `NotInitialized`.
    pub const fn new(device: UnalignedBlockDevice<D>) -> Self {
        Self {
            device,
            position: 0,
        }
    }

    /// Current byte position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Borrow the wrapped adapter.
    pub fn get_ref(&self) -> &UnalignedBlockDevice<D> {
        &self.device
    }

    /// Mutably borrow the wrapped adapter.
    ///
    /// The stream position is left unchanged.
    pub fn get_mut(&mut self) -> &mut UnalignedBlockDevice<D> {
        &mut self.device
    }

    /// Consume the stream and return the adapter.
    pub fn into_inner(self) -> UnalignedBlockDevice<D> {
        self.device
    }

    fn total_size(&self) -> Result<u64, StreamError<D::Error>> {
        self.device
            .total_size()
            .ok_or(StreamError::Adapter(UnalignedError::NotInitialized))
    }

    /// Bytes between `position` and the end of the device, capped at `want`.
    fn available(&self, want: usize) -> Result<usize, StreamError<D::Error>> {
        let remaining = self.total_size()?.saturating_sub(self.position);
        Ok(usize::try_from(remaining).map_or(want, |r| r.min(want)))
    }

    /// Read bytes from the current position.
    ///
    /// Returns `Ok(0)` at or past the end of the device.
    pub(crate) async fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError<D::Error>> {
        let n = self.available(buf.len())?;
        if n == 0 {
            return Ok(0);
        }

        self.device.read(self.position, &mut buf[..n]).await?;
        self.position += n as u64;
        Ok(n)
    }

    /// Write bytes at the current position.
    pub(crate) async fn write(&mut self, buf: &[u8]) -> Result<usize, StreamError<D::Error>> {
        if buf.is_empty() {
            return Ok(0);
        }

        let n = self.available(buf.len())?;
        if n == 0 {
            return Err(StreamError::OutOfBounds);
        }

        self.device.program(self.position, &buf[..n]).await?;
        self.position += n as u64;
        Ok(n)
    }

    /// Every write reaches the device before returning, so there is nothing
    /// to flush.
    pub(crate) async fn flush(&mut self) -> Result<(), StreamError<D::Error>> {
        Ok(())
    }

    /// Move the position.
    ///
    /// Seeking past the end is allowed; later reads return 0 and writes fail.
    pub(crate) async fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError<D::Error>> {
        let target = match pos {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::Current(off) => self.position.checked_add_signed(off),
            SeekFrom::End(off) => self.total_size()?.checked_add_signed(off),
        };

        self.position = target.ok_or(StreamError::InvalidSeek)?;
        Ok(self.position)
    }
}
