//! Implementations of embedded_io_async traits for [`UnalignedStream`].

use crate::domain::PageDevice;
use crate::infrastructure::streaming::{StreamError, UnalignedStream};
use embedded_io_async::{ErrorType, Read, Seek, SeekFrom, Write};

impl<D> ErrorType for UnalignedStream<D>
where
    D: PageDevice,
    D::Error: core::error::Error,
{
    type Error = StreamError<D::Error>;
}

impl<D> Read for UnalignedStream<D>
where
    D: PageDevice,
    D::Error: core::error::Error,
{
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        UnalignedStream::read(self, buf).await
    }
}

impl<D> Write for UnalignedStream<D>
where
    D: PageDevice,
    D::Error: core::error::Error,
{
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        UnalignedStream::write(self, buf).await
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        UnalignedStream::flush(self).await
    }
}

impl<D> Seek for UnalignedStream<D>
where
    D: PageDevice,
    D::Error: core::error::Error,
{
    async fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        UnalignedStream::seek(self, pos).await
    }
}
