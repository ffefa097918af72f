//! Domain layer - page arithmetic and the read-modify-write protocol.
//!
//! The domain layer contains:
//! - **Entities**: `StagingPage` (scratch buffer + cache tag)
//! - **Value Objects**: `PageNumber`, `PageGeometry`, `PageSpan`, `PageRange`
//! - **Domain Services**: `UnalignedBlockDevice`
//! - **Ports**: `PageDevice`
//! - **Domain Errors**: `UnalignedError`
//!
//! # Hexagonal Architecture
//!
//! ```text
//!     ┌──────────────────────────────────┐
//!     │      Domain Layer (Core)         │
//!     │                                  │
//!     │  ┌────────────────────────────┐  │
//!     │  │  Entities & Value Objects  │  │
//!     │  │  - StagingPage, PageSpan   │  │
//!     │  └────────────────────────────┘  │
//!     │              ▲                   │
//!     │              │                   │
//!     │  ┌────────────────────────────┐  │
//!     │  │    Domain Services         │  │
//!     │  │    - UnalignedBlockDevice  │  │
//!     │  └────────────────────────────┘  │
//!     │              │                   │
//!     │              ▼                   │
//!     │  ┌────────────────────────────┐  │
//!     │  │    Ports (Interfaces)      │  │
//!     │  │    - PageDevice            │  │
//!     │  └────────────────────────────┘  │
//!     └──────────────────────────────────┘
//!                    ▲
//!                    │ implemented by
//!                    │
//!     ┌──────────────────────────────────┐
//!     │  Drivers / Adapter Layer         │
//!     │  - NorFlashDevice                │
//!     └──────────────────────────────────┘
//! ```

pub mod entities;
pub mod value_objects;
pub mod ports;
pub mod error;

mod unaligned_device;

// Re-export commonly used types
pub use entities::StagingPage;
pub use value_objects::{GeometryError, PageGeometry, PageNumber, PageRange, PageSpan, PageSpans};
pub use ports::PageDevice;
pub use error::UnalignedError;
pub use unaligned_device::UnalignedBlockDevice;
