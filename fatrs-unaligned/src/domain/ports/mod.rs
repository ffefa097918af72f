//! Ports define the interfaces between the domain and the outside world.
//!
//! This module contains the **secondary (driven) port** the adapter depends
//! on: the page-aligned storage device.

mod page_device;

pub use page_device::PageDevice;
