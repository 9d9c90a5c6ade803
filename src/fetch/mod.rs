//! Listing sources.
//!
//! The engine only sees the `ListingSource` trait. `MarketplaceClient` is the
//! real implementation; tests plug in canned responses.

pub mod client;

use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

pub use client::MarketplaceClient;

/// Decoded body of the active-listings endpoint. Only the first page is ever read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingsPage {
    pub count: u64,
    #[serde(default)]
    pub results: Vec<Value>,
}

impl ListingsPage {
    /// True when the response carries nothing to build a snapshot from.
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.results.is_empty()
    }
}

pub trait ListingSource {
    fn fetch_listings(&self, shop_id: &str, api_key: &str) -> Result<ListingsPage, FetchError>;
}
