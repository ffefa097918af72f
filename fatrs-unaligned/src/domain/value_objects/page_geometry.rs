//! Device geometry value object.

use super::{PageNumber, PageRange, PageSpans};

/// Page layout of a device as reported at init time.
///
/// Holds the page size and total size and performs every byte-address to
/// page translation the adapter needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageGeometry {
    page_size: usize,
    total_size: u64,
}

impl PageGeometry {
    /// Create a geometry from a page size and a total size in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero or `total_size` is not a whole
    /// number of pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatrs_unaligned::domain::PageGeometry;
    ///
    /// let geometry = PageGeometry::new(512, 4096).unwrap();
    /// assert_eq!(geometry.page_count(), 8);
    /// ```
    pub const fn new(page_size: usize, total_size: u64) -> Result<Self, GeometryError> {
        if page_size == 0 {
            return Err(GeometryError::ZeroPageSize);
        }

        if total_size % page_size as u64 != 0 {
            return Err(GeometryError::PartialPage {
                page_size,
                total_size,
            });
        }

        Ok(Self {
            page_size,
            total_size,
        })
    }

    /// Page size in bytes.
    #[inline]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total device size in bytes.
    #[inline]
    pub const fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Number of pages on the device.
    #[inline]
    pub const fn page_count(&self) -> u64 {
        self.total_size / self.page_size as u64
    }

    /// Last page on the device, or `None` for an empty device.
    #[inline]
    pub const fn last_page(&self) -> Option<PageNumber> {
        match self.page_count() {
            0 => None,
            n => Some(PageNumber::new(n - 1)),
        }
    }

    /// Byte address of the first byte of `page`.
    #[inline]
    pub const fn page_address(&self, page: PageNumber) -> u64 {
        page.value() * self.page_size as u64
    }

    /// Split a byte address into its page and the offset within that page.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatrs_unaligned::domain::PageGeometry;
    ///
    /// let geometry = PageGeometry::new(4096, 1 << 20).unwrap();
    /// let (page, offset) = geometry.locate(5000);
    /// assert_eq!(page.value(), 1);
    /// assert_eq!(offset, 904);
    /// ```
    #[inline]
    pub const fn locate(&self, addr: u64) -> (PageNumber, usize) {
        let page_size = self.page_size as u64;
        (PageNumber::new(addr / page_size), (addr % page_size) as usize)
    }

    /// Whether `len` bytes starting at `addr` lie inside the device.
    #[inline]
    pub const fn contains(&self, addr: u64, len: u64) -> bool {
        match addr.checked_add(len) {
            Some(end) => end <= self.total_size,
            None => false,
        }
    }

    /// Split `len` bytes starting at `addr` into per-page chunks.
    #[inline]
    pub const fn spans(&self, addr: u64, len: usize) -> PageSpans {
        PageSpans::new(self.page_size, addr, len)
    }

    /// Pages touched by an erase of `size` bytes at `addr`.
    ///
    /// Runs from the page holding `addr` up to and including the page holding
    /// `addr + size`, clamped to the last page of the device. Returns `None` if
    /// nothing is left after clamping.
    pub const fn erase_range(&self, addr: u64, size: u64) -> Option<PageRange> {
        let Some(last) = self.last_page() else {
            return None;
        };
        let page_size = self.page_size as u64;
        let start = addr / page_size;
        let end = match addr.checked_add(size) {
            Some(end) => end / page_size,
            None => u64::MAX,
        };
        let end = if end > last.value() { last.value() } else { end };
        PageRange::new(PageNumber::new(start), PageNumber::new(end))
    }
}

/// Errors that can occur when building a [`PageGeometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Device reported a page size of zero.
    ZeroPageSize,
    /// Device size is not a whole number of pages.
    PartialPage {
        /// Reported page size.
        page_size: usize,
        /// Reported total size.
        total_size: u64,
    },
}

impl core::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroPageSize => write!(f, "Page size cannot be zero"),
            Self::PartialPage {
                page_size,
                total_size,
            } => write!(
                f,
                "Device size {} is not a multiple of page size {}",
                total_size, page_size
            ),
        }
    }
}

impl core::error::Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_rejects_zero_page_size() {
        assert_eq!(PageGeometry::new(0, 1024), Err(GeometryError::ZeroPageSize));
    }

    #[test]
    fn test_geometry_rejects_partial_page() {
        assert!(matches!(
            PageGeometry::new(512, 1000),
            Err(GeometryError::PartialPage { page_size: 512, total_size: 1000 })
        ));
    }

    #[test]
    fn test_locate_and_address() {
        let geometry = PageGeometry::new(16, 256).unwrap();
        assert_eq!(geometry.locate(0), (PageNumber::new(0), 0));
        assert_eq!(geometry.locate(15), (PageNumber::new(0), 15));
        assert_eq!(geometry.locate(16), (PageNumber::new(1), 0));
        assert_eq!(geometry.page_address(PageNumber::new(3)), 48);
        assert_eq!(geometry.page_count(), 16);
        assert_eq!(geometry.last_page(), Some(PageNumber::new(15)));
    }

    #[test]
    fn test_contains() {
        let geometry = PageGeometry::new(16, 256).unwrap();
        assert!(geometry.contains(0, 256));
        assert!(geometry.contains(256, 0));
        assert!(!geometry.contains(250, 7));
        assert!(!geometry.contains(u64::MAX, 2));
    }

    #[test]
    fn test_erase_range_sub_page() {
        let geometry = PageGeometry::new(16, 256).unwrap();
        let range = geometry.erase_range(17, 4).unwrap();
        assert_eq!((range.start().value(), range.end().value()), (1, 1));
    }

    #[test]
    fn test_erase_range_straddles_one_boundary() {
        let geometry = PageGeometry::new(16, 256).unwrap();
        let range = geometry.erase_range(12, 8).unwrap();
        assert_eq!((range.start().value(), range.end().value()), (0, 1));
    }

    #[test]
    fn test_erase_range_includes_page_at_end_address() {
        let geometry = PageGeometry::new(16, 256).unwrap();
        let range = geometry.erase_range(0, 16).unwrap();
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn test_erase_range_clamped_to_device() {
        let geometry = PageGeometry::new(16, 64).unwrap();
        let range = geometry.erase_range(32, 32).unwrap();
        assert_eq!((range.start().value(), range.end().value()), (2, 3));

        let empty = PageGeometry::new(16, 0).unwrap();
        assert_eq!(empty.erase_range(0, 0), None);
    }

    #[test]
    fn test_geometry_error_display() {
        let msg = format!("{}", GeometryError::PartialPage { page_size: 512, total_size: 1000 });
        assert!(msg.contains("1000"));
        assert!(msg.contains("512"));
    }
}
