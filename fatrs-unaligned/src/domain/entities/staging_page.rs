//! Staging page entity: the adapter's one-page scratch buffer and its cache tag.

use crate::domain::value_objects::PageNumber;
use alloc::collections::TryReserveError;
use alloc::vec::Vec;

/// A page-sized scratch buffer plus the tag of the device page it mirrors.
///
/// The tag is `Some(page)` only while the buffer holds exactly what the device
/// holds for `page`. Every method that hands out the buffer for writing
/// clears the tag first; callers re-tag with [`mark_cached`](Self::mark_cached)
/// once the device and buffer agree again. An interrupted operation
/// therefore leaves the page untagged rather than stale.
pub struct StagingPage {
    data: Vec<u8>,
    cached: Option<PageNumber>,
}

impl StagingPage {
    /// Allocate a zero-filled staging page of `page_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the buffer cannot be reserved.
    pub fn allocate(page_size: usize) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(page_size)?;
        data.resize(page_size, 0);

        Ok(Self { data, cached: None })
    }

    /// Size of the buffer in bytes. Always the device page size.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is zero-sized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The page currently mirrored by the buffer, if any.
    #[inline]
    pub const fn cached(&self) -> Option<PageNumber> {
        self.cached
    }

    /// Whether the buffer currently mirrors `page`.
    #[inline]
    pub fn is_cached(&self, page: PageNumber) -> bool {
        self.cached == Some(page)
    }

    /// Record that the buffer now matches the device contents of `page`.
    #[inline]
    pub fn mark_cached(&mut self, page: PageNumber) {
        self.cached = Some(page);
    }

    /// Drop the cache tag.
    #[inline]
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Read-only view of the whole page.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whole page as a destination for a device read.
    ///
    /// Clears the cache tag.
    #[inline]
    pub fn load_target(&mut self) -> &mut [u8] {
        self.cached = None;
        &mut self.data
    }

    /// Overwrite `src.len()` bytes starting at `offset` with `src`.
    ///
    /// Clears the cache tag: the buffer now differs from the device until it
    /// is programmed back.
    ///
    /// # Panics
    ///
    /// Panics if the write would run past the end of the page.
    pub fn merge(&mut self, offset: usize, src: &[u8]) {
        self.cached = None;
        self.data[offset..offset + src.len()].copy_from_slice(src);
    }

    /// Copy `dest.len()` bytes starting at `offset` out of the page.
    ///
    /// # Panics
    ///
    /// Panics if the read would run past the end of the page.
    pub fn copy_out(&self, offset: usize, dest: &mut [u8]) {
        dest.copy_from_slice(&self.data[offset..offset + dest.len()]);
    }

    /// Fill the whole page with `value`. Clears the cache tag.
    pub fn fill(&mut self, value: u8) {
        self.cached = None;
        self.data.fill(value);
    }
}

impl core::fmt::Debug for StagingPage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StagingPage")
            .field("len", &self.data.len())
            .field("cached", &self.cached)
            .finish()
    }
}
