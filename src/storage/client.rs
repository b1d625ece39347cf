//! REST client for the Supabase table store.

use crate::config::StorageCredentials;
use crate::storage::error::StorageError;
use crate::storefront::ProductRecord;
use async_trait::async_trait;
use tracing::{debug, info};
use wreq::Client;

/// Batched upsert target - enables in-memory stores for tests.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Inserts `rows`, merging into existing rows whose `on_conflict` column matches.
    async fn upsert(
        &self,
        table: &str,
        on_conflict: &str,
        rows: &[ProductRecord],
    ) -> Result<(), StorageError>;

    /// Human-readable handle of the table, printed before writing.
    fn table_handle(&self, table: &str) -> String;
}

/// PostgREST client bound to one project URL and key.
pub struct RestClient {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl RestClient {
    /// Creates a client from credentials, rejecting missing or malformed ones.
    pub fn new(credentials: &StorageCredentials) -> Result<Self, StorageError> {
        let url = credentials.url.trim();
        if url.is_empty() {
            return Err(StorageError::Config("storage URL is required".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(StorageError::Config(format!("storage URL is not an http(s) URL: {}", url)));
        }
        if credentials.api_key.trim().is_empty() {
            return Err(StorageError::Config("storage API key is required".to_string()));
        }

        let client = Client::builder().gzip(true).build()?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", url.trim_end_matches('/')),
            api_key: credentials.api_key.trim().to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }
}

#[async_trait]
impl TableStore for RestClient {
    async fn upsert(
        &self,
        table: &str,
        on_conflict: &str,
        rows: &[ProductRecord],
    ) -> Result<(), StorageError> {
        let url =
            format!("{}?on_conflict={}", self.table_url(table), urlencoding::encode(on_conflict));
        let body = serde_json::to_string(rows)?;

        info!("Upserting {} rows into {}", rows.len(), table);
        debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await?;
        Err(StorageError::from_response(status.as_u16(), &text))
    }

    fn table_handle(&self, table: &str) -> String {
        self.table_url(table)
    }
}
