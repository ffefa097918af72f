//! Unaligned byte access over page-aligned block devices.
//!
//! Many storage devices (NOR flash sectors, SD cards, EEPROM emulations) only
//! accept reads and programs of whole, page-aligned pages. This crate wraps
//! such a device and exposes byte-granular `read`, `program` and `erase`
//! operations at arbitrary addresses, using a single page-sized staging buffer
//! for read-modify-write.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! ## Domain Layer (`domain`)
//! Pure logic with no infrastructure dependencies:
//! - **Entities**: `StagingPage` holding the staging buffer and its cache tag
//! - **Value Objects**: `PageNumber`, `PageGeometry`, `PageSpan`, `PageRange`
//! - **Service**: `UnalignedBlockDevice` splitting requests into page spans
//! - **Ports**: `PageDevice` interface for the wrapped device
//!
//! ## Adapter Layer (`adapters`)
//! Concrete `PageDevice` implementations:
//! - **`NorFlashDevice`**: Exposes an `embedded-storage` NOR flash region
//!   sector by sector (requires `embedded-storage`)
//!
//! ## Infrastructure Layer (`infrastructure`)
//! - **`UnalignedStream`**: Cursor over the adapter implementing the
//!   `embedded_io_async` Read/Write/Seek traits
//!
//! # Quick Start
//!
//! ```ignore
//! use fatrs_unaligned::UnalignedBlockDevice;
//!
//! let mut dev = UnalignedBlockDevice::new(my_page_device);
//! dev.init().await?;
//!
//! // 42 bytes starting 11 bytes into the device, across 4 pages of 16 bytes
//! dev.program(11, &payload).await?;
//!
//! let mut out = [0u8; 42];
//! dev.read(11, &mut out).await?;
//!
//! dev.erase(0, 16).await?;
//! ```
//!
//! # Status Codes
//!
//! Callers that report integer statuses can map any result through
//! [`status::StatusCode`]. Device errors pass through unchanged.
//!
//! # Features
//!
//! - `std`: Enable standard library features in `embedded-io-async`
//! - `embedded-storage`: Enable the `NorFlashDevice` adapter
//! - `log`: Enable logging support
//! - `defmt`: Enable defmt logging for embedded

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![allow(async_fn_in_trait)]

extern crate alloc;

// MUST be the first module listed
mod fmt;

// Core layers
pub mod domain;
pub mod adapters;
pub mod infrastructure;
pub mod status;

// Re-export commonly used types for convenience
pub use domain::{
    GeometryError, PageDevice, PageGeometry, PageNumber, PageRange, PageSpan, PageSpans,
    StagingPage, UnalignedBlockDevice, UnalignedError,
};

#[cfg(feature = "embedded-storage")]
pub use adapters::{NorFlashConfig, NorFlashDevice, NorFlashError};

// Infrastructure layer exports
pub use infrastructure::streaming::{StreamError, UnalignedStream};

pub use status::StatusCode;

// Re-export embedded_io_async for convenience
pub use embedded_io_async;
