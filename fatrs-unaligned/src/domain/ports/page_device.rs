//! PageDevice port - Secondary (driven) port for page-aligned I/O.
//!
//! This port defines what the adapter needs from the storage driver. The
//! driver only has to deal in whole pages; all byte-level bookkeeping lives
//! on the domain side.

/// Port for page-aligned storage devices.
///
/// This is a **secondary (driven) port** in hexagonal architecture terms.
/// [`UnalignedBlockDevice`](crate::UnalignedBlockDevice) depends on this
/// abstraction; drivers and the adapters in [`crate::adapters`] implement it.
///
/// # Contract
///
/// - `read` and `program` are only ever called with a page-aligned `addr`
///   and a buffer of exactly [`page_size`](Self::page_size) bytes.
/// - `page_size` and `total_size` are only queried after a successful
///   [`init`](Self::init), and must stay constant until the next `init`.
/// - `program` replaces the whole page. Devices that need an erase before
///   programming (NOR flash) perform it themselves.
///
/// `PageDevice` is also implemented for `&mut T`, so an adapter can borrow a
/// device instead of owning it.
///
/// # Examples
///
/// ```ignore
/// struct RamDisk { data: Vec<u8>, page_size: usize }
///
/// impl PageDevice for RamDisk {
///     type Error = core::convert::Infallible;
///
///     async fn init(&mut self) -> Result<(), Self::Error> { Ok(()) }
///     fn page_size(&self) -> usize { self.page_size }
///     fn total_size(&self) -> u64 { self.data.len() as u64 }
///
///     async fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
///         let start = addr as usize;
///         buf.copy_from_slice(&self.data[start..start + buf.len()]);
///         Ok(())
///     }
///
///     async fn program(&mut self, addr: u64, buf: &[u8]) -> Result<(), Self::Error> {
///         let start = addr as usize;
///         self.data[start..start + buf.len()].copy_from_slice(buf);
///         Ok(())
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait PageDevice {
    /// The error type reported by the driver.
    ///
    /// Passed through to the caller unchanged inside
    /// [`UnalignedError::Device`](crate::UnalignedError::Device).
    type Error: core::fmt::Debug;

    /// Bring the device up. Called by every adapter `init`.
    async fn init(&mut self) -> Result<(), Self::Error>;

    /// Size of one page in bytes.
    fn page_size(&self) -> usize;

    /// Total size of the device in bytes.
    fn total_size(&self) -> u64;

    /// Read the page starting at byte address `addr` into `buf`.
    async fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Program the page starting at byte address `addr` with `buf`.
    async fn program(&mut self, addr: u64, buf: &[u8]) -> Result<(), Self::Error>;

    /// Byte value an erased page reads back as.
    fn erase_value(&self) -> u8 {
        0xFF
    }
}

impl<T: PageDevice + ?Sized> PageDevice for &mut T {
    type Error = T::Error;

    async fn init(&mut self) -> Result<(), Self::Error> {
        T::init(self).await
    }

    fn page_size(&self) -> usize {
        T::page_size(self)
    }

    fn total_size(&self) -> u64 {
        T::total_size(self)
    }

    async fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, addr, buf).await
    }

    async fn program(&mut self, addr: u64, buf: &[u8]) -> Result<(), Self::Error> {
        T::program(self, addr, buf).await
    }

    fn erase_value(&self) -> u8 {
        T::erase_value(self)
    }
}
