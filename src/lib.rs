//! metrotukku-sync - Metrotukku catalog scraper with Supabase upsert
//!
//! Fetches the storefront's product listing once, extracts one record per
//! listing, and reconciles the batch into a remote table keyed on product URL.

pub mod commands;
pub mod config;
pub mod format;
pub mod storage;
pub mod storefront;

pub use config::{Config, StorageCredentials};
pub use storage::{save_to_storage, StorageError, TableStore};
pub use storefront::{ListingSource, ProductRecord};
