//! Persisting scraped records into the remote table.

pub mod client;
pub mod error;
pub mod remediation;

pub use client::{RestClient, TableStore};
pub use error::StorageError;
pub use remediation::Remediation;

use crate::config::StorageConfig;
use crate::storefront::models::{duplicate_urls, ProductRecord};
use std::io::Write;
use tracing::warn;

/// Upserts all records in one batch and returns how many were submitted.
///
/// The table handle is written to `out` first. When the store rejects the
/// batch with a recognized failure, remediation guidance is written to `out`
/// and the store's error is returned as-is. A failed write to `out` aborts
/// with [`StorageError::Output`].
pub async fn save_to_storage(
    store: &impl TableStore,
    storage: &StorageConfig,
    records: &[ProductRecord],
    out: &mut impl Write,
) -> Result<usize, StorageError> {
    writeln!(out, "Target table: {}", store.table_handle(&storage.table))?;

    let dupes = duplicate_urls(records);
    if !dupes.is_empty() {
        warn!(
            "{} URLs appear more than once in this batch; the upsert may reject it (first: {})",
            dupes.len(),
            dupes[0]
        );
    }

    if let Err(e) = store.upsert(&storage.table, &storage.conflict_column, records).await {
        if let Some(remediation) = Remediation::classify(&e) {
            writeln!(out, "{}", remediation.render(storage))?;
        }
        return Err(e);
    }

    Ok(records.len())
}
