//! Sync command implementation: scrape, then upsert.

use crate::commands::scrape::ScrapeCommand;
use crate::config::{Config, StorageCredentials};
use crate::storage::{save_to_storage, RestClient, TableStore};
use crate::storefront::{ListingSource, StorefrontClient};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// Scrapes the listing and reconciles it into the remote table.
pub struct SyncCommand {
    config: Config,
    credentials: StorageCredentials,
}

impl SyncCommand {
    /// Creates a new sync command.
    pub fn new(config: Config, credentials: StorageCredentials) -> Self {
        Self { config, credentials }
    }

    /// Runs against the live storefront and table store.
    pub async fn execute(&self, out: &mut impl Write) -> Result<usize> {
        let store = RestClient::new(&self.credentials).context("Failed to create storage client")?;
        let client = StorefrontClient::new(&self.config.storefront)
            .context("Failed to create HTTP client")?;

        self.execute_with(&client, &store, out).await
    }

    /// Runs with provided listing source and store (for testing).
    pub async fn execute_with(
        &self,
        client: &impl ListingSource,
        store: &impl TableStore,
        out: &mut impl Write,
    ) -> Result<usize> {
        let records =
            ScrapeCommand::new(self.config.clone()).execute_with_client(client, out).await?;

        let saved = save_to_storage(store, &self.config.storage, &records, out).await?;

        info!("Upserted {} products into {}", saved, self.config.storage.table);
        writeln!(out, "Saved {} products", saved)?;

        Ok(saved)
    }
}
