//! NOR flash device for embedded-storage traits
//!
//! This module provides a [`PageDevice`] over any type implementing the
//! `embedded-storage` NOR flash traits. One page is one erase sector, so a
//! page program is an erase followed by a write.
//!
//! # Example
//!
//! ```ignore
//! use esp_storage::FlashStorage as EspFlash;
//! use fatrs_unaligned::{NorFlashConfig, NorFlashDevice, UnalignedBlockDevice};
//!
//! let flash = EspFlash::new();
//! let config = NorFlashConfig::new(0x3C_0000, 64); // 256KB at offset
//! let mut bd = UnalignedBlockDevice::new(NorFlashDevice::new(flash, config));
//!
//! bd.init().await?;
//! bd.program(17, b"settings").await?;
//! ```

use crate::domain::PageDevice;
use embedded_storage::nor_flash::{NorFlash, NorFlashError as _, NorFlashErrorKind, ReadNorFlash};

/// Flash region used as a page device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NorFlashConfig {
    /// Start offset in flash (must be erase-sector aligned)
    pub start_offset: u32,
    /// Number of erase sectors to use
    pub page_count: u32,
}

impl NorFlashConfig {
    /// Create a new flash region configuration.
    ///
    /// Alignment and capacity are checked against the flash at `init` time.
    pub const fn new(start_offset: u32, page_count: u32) -> Self {
        Self {
            start_offset,
            page_count,
        }
    }
}

/// Error type for NOR flash operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NorFlashError {
    /// The flash driver reported an error.
    Flash(NorFlashErrorKind),
    /// The region does not start on an erase sector boundary.
    RegionNotAligned {
        /// Configured start offset.
        start_offset: u32,
        /// Erase sector size of the flash.
        erase_size: usize,
    },
    /// The region extends past the end of the flash.
    RegionTooLarge {
        /// First byte after the configured region.
        end: u64,
        /// Flash capacity in bytes.
        capacity: usize,
    },
    /// A page address does not map into the 32-bit flash address space.
    AddressOverflow(u64),
}

impl core::fmt::Display for NorFlashError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Flash(NorFlashErrorKind::NotAligned) => write!(f, "NOR flash error: not aligned"),
            Self::Flash(NorFlashErrorKind::OutOfBounds) => write!(f, "NOR flash error: out of bounds"),
            Self::Flash(_) => write!(f, "NOR flash error"),
            Self::RegionNotAligned {
                start_offset,
                erase_size,
            } => write!(
                f,
                "Flash region offset {:#x} is not aligned to erase size {}",
                start_offset, erase_size
            ),
            Self::RegionTooLarge { end, capacity } => write!(
                f,
                "Flash region ends at {:#x}, past flash capacity {:#x}",
                end, capacity
            ),
            Self::AddressOverflow(addr) => write!(f, "Flash address {:#x} overflows", addr),
        }
    }
}

impl core::error::Error for NorFlashError {}

/// [`PageDevice`] backed by an `embedded-storage` NOR flash.
///
/// The page size is the flash's erase sector (`F::ERASE_SIZE`); the device
/// covers `config.page_count` sectors starting at `config.start_offset`.
/// Erased flash reads back as `0xFF`.
#[derive(Debug)]
pub struct NorFlashDevice<F> {
    flash: F,
    config: NorFlashConfig,
}

impl<F: NorFlash> NorFlashDevice<F> {
    /// Create a new NOR flash device
    ///
    /// # Arguments
    /// * `flash` - The underlying flash implementation
    /// * `config` - Configuration for the flash region
    pub fn new(flash: F, config: NorFlashConfig) -> Self {
        Self { flash, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &NorFlashConfig {
        &self.config
    }

    /// Consume the device and return the underlying flash
    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Translate a device address into a flash offset.
    fn flash_offset(&self, addr: u64) -> Result<u32, NorFlashError> {
        u64::from(self.config.start_offset)
            .checked_add(addr)
            .and_then(|offset| u32::try_from(offset).ok())
            .ok_or(NorFlashError::AddressOverflow(addr))
    }
}

fn flash_error<E: embedded_storage::nor_flash::NorFlashError>(e: E) -> NorFlashError {
    NorFlashError::Flash(e.kind())
}

impl<F: NorFlash> PageDevice for NorFlashDevice<F> {
    type Error = NorFlashError;

    async fn init(&mut self) -> Result<(), Self::Error> {
        let erase_size = F::ERASE_SIZE;

        if (self.config.start_offset as usize).checked_rem(erase_size).is_some_and(|r| r != 0) {
            return Err(NorFlashError::RegionNotAligned {
                start_offset: self.config.start_offset,
                erase_size,
            });
        }

        let end = u64::from(self.config.start_offset) + self.total_size();
        let capacity = self.flash.capacity();
        if end > capacity as u64 {
            return Err(NorFlashError::RegionTooLarge { end, capacity });
        }

        Ok(())
    }

    fn page_size(&self) -> usize {
        F::ERASE_SIZE
    }

    fn total_size(&self) -> u64 {
        u64::from(self.config.page_count) * F::ERASE_SIZE as u64
    }

    async fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<(), Self::Error> {
        let offset = self.flash_offset(addr)?;
        self.flash.read(offset, buf).map_err(flash_error)
    }

    async fn program(&mut self, addr: u64, buf: &[u8]) -> Result<(), Self::Error> {
        let offset = self.flash_offset(addr)?;
        let end = self.flash_offset(addr + buf.len() as u64)?;

        // NOR flash can only clear bits; the sector must be erased first.
        self.flash.erase(offset, end).map_err(flash_error)?;
        self.flash.write(offset, buf).map_err(flash_error)
    }

    fn erase_value(&self) -> u8 {
        0xFF
    }
}
