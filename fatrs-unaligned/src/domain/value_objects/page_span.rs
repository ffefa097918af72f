//! Page-boundary splitting of byte ranges.

use super::PageNumber;

/// The part of a byte request that falls inside a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageSpan {
    /// Page the chunk lives in.
    pub page: PageNumber,
    /// Byte offset of the chunk within the page.
    pub offset: usize,
    /// Length of the chunk in bytes.
    pub len: usize,
    /// Offset of the chunk within the caller's buffer.
    pub consumed: usize,
}

impl PageSpan {
    /// Range of the chunk within the page buffer.
    #[inline]
    pub const fn page_range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Range of the chunk within the caller's buffer.
    #[inline]
    pub const fn buffer_range(&self) -> core::ops::Range<usize> {
        self.consumed..self.consumed + self.len
    }

    /// Whether the chunk covers its whole page.
    #[inline]
    pub const fn is_full_page(&self, page_size: usize) -> bool {
        self.offset == 0 && self.len == page_size
    }
}

/// Iterator over the [`PageSpan`]s of a byte range.
///
/// Created by [`PageGeometry::spans`](super::PageGeometry::spans). Every span
/// but the first starts at offset 0, and every span but the last runs to the
/// end of its page.
#[derive(Debug, Clone)]
pub struct PageSpans {
    page_size: usize,
    addr: u64,
    remaining: usize,
    consumed: usize,
}

impl PageSpans {
    pub(crate) const fn new(page_size: usize, addr: u64, len: usize) -> Self {
        Self {
            page_size,
            addr,
            remaining: len,
            consumed: 0,
        }
    }
}

impl Iterator for PageSpans {
    type Item = PageSpan;

    fn next(&mut self) -> Option<PageSpan> {
        if self.remaining == 0 {
            return None;
        }

        let page_size = self.page_size as u64;
        let page = PageNumber::new(self.addr / page_size);
        let offset = (self.addr % page_size) as usize;
        let len = (self.page_size - offset).min(self.remaining);

        let span = PageSpan {
            page,
            offset,
            len,
            consumed: self.consumed,
        };

        self.addr += len as u64;
        self.remaining -= len;
        self.consumed += len;

        Some(span)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.remaining == 0 {
            return (0, Some(0));
        }
        let head = (self.addr % self.page_size as u64) as usize;
        let n = (head + self.remaining).div_ceil(self.page_size);
        (n, Some(n))
    }
}

impl ExactSizeIterator for PageSpans {}

impl core::iter::FusedIterator for PageSpans {}

/// An inclusive range of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageRange {
    start: PageNumber,
    end: PageNumber,
}

impl PageRange {
    /// Create a range covering `start..=end`.
    ///
    /// Returns `None` if `end` comes before `start`.
    pub const fn new(start: PageNumber, end: PageNumber) -> Option<Self> {
        if end.value() < start.value() {
            None
        } else {
            Some(Self { start, end })
        }
    }

    /// First page of the range.
    #[inline]
    pub const fn start(&self) -> PageNumber {
        self.start
    }

    /// Last page of the range (inclusive).
    #[inline]
    pub const fn end(&self) -> PageNumber {
        self.end
    }

    /// Number of pages in the range.
    #[inline]
    pub const fn len(&self) -> u64 {
        self.end.value() - self.start.value() + 1
    }

    /// Whether `page` lies inside the range.
    #[inline]
    pub const fn contains(&self, page: PageNumber) -> bool {
        page.value() >= self.start.value() && page.value() <= self.end.value()
    }

    /// Iterate the pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PageNumber> + use<> {
        (self.start.value()..=self.end.value()).map(PageNumber::new)
    }
}
