//! Scrape command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::storefront::{ListingSource, Parser, ProductRecord, StorefrontClient};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// Fetches the listing page once and extracts its records in page order.
pub async fn scrape_products(
    source: &impl ListingSource,
    parser: &Parser,
) -> Result<Vec<ProductRecord>> {
    let html = source.fetch_listing().await?;

    let records = parser
        .parse_listing(&html)
        .context("Listing page does not match the expected markup")?;

    let unpriced = records.iter().filter(|r| !r.has_price()).count();
    info!("Scraped {} products ({} without a price)", records.len(), unpriced);
    Ok(records)
}

/// Scrapes the listing and prints every record.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes the live storefront.
    pub async fn execute(&self, out: &mut impl Write) -> Result<Vec<ProductRecord>> {
        let client = StorefrontClient::new(&self.config.storefront)
            .context("Failed to create HTTP client")?;

        self.execute_with_client(&client, out).await
    }

    /// Scrapes with a provided listing source (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ListingSource,
        out: &mut impl Write,
    ) -> Result<Vec<ProductRecord>> {
        let parser = Parser::new(self.config.storefront.clone());
        let records = scrape_products(client, &parser).await?;

        let formatter = Formatter::new(self.config.format);
        writeln!(out, "{}", formatter.format_records(&records))?;

        Ok(records)
    }
}
