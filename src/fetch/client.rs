use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use super::{ListingSource, ListingsPage};
use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://openapi.etsy.com/v2";

pub struct MarketplaceClient {
    client: Client,
    base_url: String,
}

impl MarketplaceClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("shopwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Active-listings endpoint for a shop, without credentials.
    pub fn listings_url(&self, shop_id: &str) -> String {
        format!("{}/shops/{shop_id}/listings/active", self.base_url)
    }
}

impl ListingSource for MarketplaceClient {
    fn fetch_listings(&self, shop_id: &str, api_key: &str) -> Result<ListingsPage, FetchError> {
        let url = self.listings_url(shop_id);
        debug!(url = %url, "fetching active listings");

        // reqwest errors echo the full url, which would leak the api key into logs
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: url.clone(),
            source: source.without_url(),
        };

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        let body = response.text().map_err(transport)?;
        let page: ListingsPage = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })?;

        info!(shop_id, count = page.count, returned = page.results.len(), "listings fetched");
        Ok(page)
    }
}
