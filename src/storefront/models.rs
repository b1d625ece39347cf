//! Data model for scraped catalog entries.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One product listing, shaped exactly like a row of the target table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Trimmed display name
    pub name: String,
    /// Price in euros, 0.0 when the listing shows none
    pub price: f64,
    /// Absolute product page URL, the upsert key
    pub url: String,
    /// Absolute thumbnail URL
    pub image_url: Option<String>,
    /// Catalog product code
    pub code: String,
}

impl ProductRecord {
    /// Returns true if the listing had a usable price.
    pub fn has_price(&self) -> bool {
        self.price > 0.0
    }
}

/// Returns URLs that occur more than once, in first-seen order.
pub fn duplicate_urls(records: &[ProductRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dupes = Vec::new();

    for record in records {
        let url = record.url.as_str();
        if !seen.insert(url) && reported.insert(url) {
            dupes.push(url);
        }
    }

    dupes
}
