//! Adapter layer - drivers implementing the domain's `PageDevice` port.
//!
//! # Available Adapters
//!
//! - **`NorFlashDevice`**: `embedded-storage` NOR flash as a `PageDevice`
//!   (requires the `embedded-storage` feature)

#[cfg(feature = "embedded-storage")]
mod nor_flash_device;

#[cfg(feature = "embedded-storage")]
pub use nor_flash_device::{NorFlashConfig, NorFlashDevice, NorFlashError};
