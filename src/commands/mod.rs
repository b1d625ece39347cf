//! CLI command implementations.

pub mod scrape;
pub mod sync;

pub use scrape::{scrape_products, ScrapeCommand};
pub use sync::SyncCommand;
