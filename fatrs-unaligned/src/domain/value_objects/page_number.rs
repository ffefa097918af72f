//! Type-safe page number value object.

use core::fmt;

/// Index of a device page.
///
/// Kept distinct from byte addresses so the two can't be mixed up in the
/// page-splitting arithmetic. Absence of a page (an empty cache) is modelled
/// as `Option<PageNumber>`, never as a reserved index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageNumber(u64);

impl PageNumber {
    /// Create a new page number.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatrs_unaligned::domain::PageNumber;
    ///
    /// let page = PageNumber::new(0);
    /// assert_eq!(page.value(), 0);
    /// ```
    #[inline]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Get the next page number.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

impl From<u64> for PageNumber {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<PageNumber> for u64 {
    fn from(page: PageNumber) -> Self {
        page.value()
    }
}
