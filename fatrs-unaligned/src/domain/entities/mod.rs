//! Domain entities.
//!
//! The only entity is the `StagingPage`: the adapter's page-sized scratch
//! buffer together with the tag naming the device page it currently mirrors.

mod staging_page;

pub use staging_page::StagingPage;
