//! Infrastructure layer - higher-level I/O built on the adapter.
//!
//! This module provides a streaming wrapper around `UnalignedBlockDevice`,
//! adding async Read/Write/Seek for integration with `embedded-io-async`
//! consumers.

pub mod streaming;
