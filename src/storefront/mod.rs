//! Metrotukku storefront: listing fetch, selectors, and record extraction.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{ListingSource, StorefrontClient};
pub use models::ProductRecord;
pub use parser::{parse_price, ExtractError, Parser};
