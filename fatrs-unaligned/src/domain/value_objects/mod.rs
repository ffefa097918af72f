//! Value objects for the domain layer.
//!
//! Value objects are immutable, validated data types that represent
//! concepts in the domain model. They provide type safety and encapsulate
//! the address arithmetic.

mod page_geometry;
mod page_number;
mod page_span;

pub use page_geometry::{GeometryError, PageGeometry};
pub use page_number::PageNumber;
pub use page_span::{PageRange, PageSpan, PageSpans};
