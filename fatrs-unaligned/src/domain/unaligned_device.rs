//! UnalignedBlockDevice domain service - byte-granular access over whole pages.
//!
//! Every request is cut into per-page chunks by [`PageGeometry::spans`]. Each
//! chunk goes through the single staging page: fetched from the device when it
//! is not already cached, patched or copied, and for writes programmed back
//! in full.

use crate::domain::{
    entities::StagingPage,
    error::UnalignedError,
    ports::PageDevice,
    value_objects::{PageGeometry, PageNumber},
};

/// Byte-addressable view of a page-aligned [`PageDevice`].
///
/// Reads, programs and erases at any offset and of any length are turned
/// into full-page device transfers. A single page-sized staging buffer is
/// allocated by [`init`](Self::init) and reused by every call. The page it
/// holds acts as a depth-1 cache, so runs of small accesses to one page cost
/// one device read.
///
/// # Exclusive access
///
/// All operations take `&mut self`, so one adapter can't be driven from two
/// places at once. Share it behind your own mutex, or use one adapter per
/// I/O stream. The cache assumes the adapter is the only page-level
/// accessor of the device: writing to the device behind its back (other
/// than through [`device_mut`](Self::device_mut)) leaves the cached page
/// stale.
///
/// # Partial completion
///
/// Multi-page operations stop at the first device error. Pages programmed
/// or bytes copied before the failure stay that way; nothing is rolled back.
///
/// # Examples
///
/// ```ignore
/// use fatrs_unaligned::UnalignedBlockDevice;
///
/// let mut flash = MyPageDevice::new();
/// let mut bd = UnalignedBlockDevice::new(&mut flash);
/// bd.init().await?;
///
/// bd.program(1000, b"hello").await?;
///
/// let mut buf = [0u8; 5];
/// bd.read(1000, &mut buf).await?;
/// assert_eq!(&buf, b"hello");
/// ```
#[derive(Debug)]
pub struct UnalignedBlockDevice<D> {
    device: D,
    state: Option<Initialized>,
}

/// State that only exists between a successful `init` and teardown.
#[derive(Debug)]
struct Initialized {
    geometry: PageGeometry,
    page: StagingPage,
}

impl Initialized {
    fn check_range<E>(&self, addr: u64, len: u64) -> Result<(), UnalignedError<E>> {
        if self.geometry.contains(addr, len) {
            Ok(())
        } else {
            Err(UnalignedError::OutOfBounds {
                addr,
                len,
                total: self.geometry.total_size(),
            })
        }
    }
}

fn device_error<E>(op: &'static str, page: PageNumber) -> impl FnOnce(E) -> UnalignedError<E> {
    move |e| {
        warn!("device {} of page {} failed", op, page.value());
        UnalignedError::Device(e)
    }
}

impl<D: PageDevice> UnalignedBlockDevice<D> {
    /// Wrap a device. The device is not touched until [`init`](Self::init).
    pub const fn new(device: D) -> Self {
        Self {
            device,
            state: None,
        }
    }

    /// Initialize the device and allocate the staging buffer.
    ///
    /// Any buffer from an earlier `init` is released first and the cache is
    /// emptied, so calling this again is safe and starts from a clean slate.
    /// After a failed `init` the adapter is uninitialized.
    ///
    /// # Errors
    ///
    /// - [`UnalignedError::Device`] if the device fails to initialize
    /// - [`UnalignedError::InvalidGeometry`] if the reported sizes are unusable
    /// - [`UnalignedError::NoMemory`] if the staging buffer can't be allocated
    pub async fn init(&mut self) -> Result<(), UnalignedError<D::Error>> {
        self.state = None;

        self.device.init().await.map_err(|e| {
            warn!("device init failed");
            UnalignedError::Device(e)
        })?;

        let geometry = PageGeometry::new(self.device.page_size(), self.device.total_size())
            .map_err(UnalignedError::InvalidGeometry)?;

        let page = StagingPage::allocate(geometry.page_size()).map_err(|_| {
            warn!("cannot allocate {} byte staging page", geometry.page_size());
            UnalignedError::NoMemory
        })?;

        debug!(
            "initialized: page_size={} total_size={}",
            geometry.page_size(),
            geometry.total_size()
        );

        self.state = Some(Initialized { geometry, page });
        Ok(())
    }

    /// Release the staging buffer and return to the uninitialized state.
    ///
    /// The device itself is left alone. Dropping the adapter has the same
    /// effect on the buffer.
    pub fn deinit(&mut self) {
        self.state = None;
    }

    /// Write `data` to the device starting at byte address `addr`.
    ///
    /// Each touched page is read (unless it is the cached page), patched in
    /// the staging buffer, and programmed back in full.
    ///
    /// # Errors
    ///
    /// - [`UnalignedError::NotInitialized`] before `init`
    /// - [`UnalignedError::OutOfBounds`] if the range leaves the device
    /// - [`UnalignedError::Device`] on the first device failure; earlier
    ///   pages stay programmed
    pub async fn program(&mut self, addr: u64, data: &[u8]) -> Result<(), UnalignedError<D::Error>> {
        let Self { device, state } = self;
        let state = state.as_mut().ok_or(UnalignedError::NotInitialized)?;
        state.check_range(addr, data.len() as u64)?;

        trace!("program addr={} len={}", addr, data.len());

        for span in state.geometry.spans(addr, data.len()) {
            let page_addr = state.geometry.page_address(span.page);

            trace!(
                "program page={} offset={} len={}",
                span.page.value(),
                span.offset,
                span.len
            );

            // Bytes outside the chunk must survive the full-page program.
            if !state.page.is_cached(span.page) {
                device
                    .read(page_addr, state.page.load_target())
                    .await
                    .map_err(device_error("read", span.page))?;
            }

            state.page.merge(span.offset, &data[span.buffer_range()]);

            device
                .program(page_addr, state.page.data())
                .await
                .map_err(device_error("program", span.page))?;

            state.page.mark_cached(span.page);
        }

        Ok(())
    }

    /// Fill `buf` with the bytes stored at byte address `addr`.
    ///
    /// # Errors
    ///
    /// - [`UnalignedError::NotInitialized`] before `init`
    /// - [`UnalignedError::OutOfBounds`] if the range leaves the device
    /// - [`UnalignedError::Device`] on the first device failure; chunks
    ///   copied before it remain in `buf`
    pub async fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), UnalignedError<D::Error>> {
        let Self { device, state } = self;
        let state = state.as_mut().ok_or(UnalignedError::NotInitialized)?;
        state.check_range(addr, buf.len() as u64)?;

        trace!("read addr={} len={}", addr, buf.len());

        for span in state.geometry.spans(addr, buf.len()) {
            if state.page.is_cached(span.page) {
                trace!("read page={} cached", span.page.value());
            } else {
                trace!("read page={} from device", span.page.value());
                device
                    .read(state.geometry.page_address(span.page), state.page.load_target())
                    .await
                    .map_err(device_error("read", span.page))?;
                state.page.mark_cached(span.page);
            }

            state.page.copy_out(span.offset, &mut buf[span.buffer_range()]);
        }

        Ok(())
    }

    /// Erase the pages covering `size` bytes at byte address `addr`.
    ///
    /// Every page from the one holding `addr` through the one holding
    /// `addr + size` is programmed with the device's erase value, without
    /// reading it first. Erasing works on whole pages: bytes sharing a page
    /// with the requested range are erased too. The page range is clamped to
    /// the end of the device.
    ///
    /// # Errors
    ///
    /// - [`UnalignedError::NotInitialized`] before `init`
    /// - [`UnalignedError::OutOfBounds`] if the range leaves the device
    /// - [`UnalignedError::Device`] on the first device failure; earlier
    ///   pages stay erased
    pub async fn erase(&mut self, addr: u64, size: u64) -> Result<(), UnalignedError<D::Error>> {
        let Self { device, state } = self;
        let state = state.as_mut().ok_or(UnalignedError::NotInitialized)?;
        state.check_range(addr, size)?;

        let Some(range) = state.geometry.erase_range(addr, size) else {
            return Ok(());
        };

        trace!(
            "erase addr={} size={} pages={}..={}",
            addr,
            size,
            range.start().value(),
            range.end().value()
        );

        // The buffer no longer mirrors whatever page it held.
        state.page.fill(device.erase_value());

        for page in range.iter() {
            device
                .program(state.geometry.page_address(page), state.page.data())
                .await
                .map_err(device_error("erase", page))?;
        }

        Ok(())
    }

    /// Whether [`init`](Self::init) has completed successfully.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Geometry recorded at init time.
    #[inline]
    pub fn geometry(&self) -> Option<&PageGeometry> {
        self.state.as_ref().map(|s| &s.geometry)
    }

    /// Device page size, once initialized.
    #[inline]
    pub fn page_size(&self) -> Option<usize> {
        self.geometry().map(PageGeometry::page_size)
    }

    /// Device size in bytes, once initialized.
    #[inline]
    pub fn total_size(&self) -> Option<u64> {
        self.geometry().map(PageGeometry::total_size)
    }

    /// Page currently held in the staging buffer, if any.
    #[inline]
    pub fn cached_page(&self) -> Option<PageNumber> {
        self.state.as_ref().and_then(|s| s.page.cached())
    }

    /// Get a reference to the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Get a mutable reference to the underlying device.
    ///
    /// Empties the page cache, since the caller may change the device contents.
    pub fn device_mut(&mut self) -> &mut D {
        if let Some(state) = self.state.as_mut() {
            state.page.invalidate();
        }
        &mut self.device
    }

    /// Consume the adapter and return the underlying device.
    pub fn into_inner(self) -> D {
        self.device
    }
}
