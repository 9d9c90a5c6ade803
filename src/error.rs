//! Error taxonomy.
//!
//! - StoreError: snapshot file could not be read, parsed or written
//! - FetchError: the listings endpoint failed or returned something unusable
//! - CycleError: why one shop's fetch-and-compare cycle was aborted
//! - ConfigError: startup configuration problems
//!
//! Only ConfigError is fatal. The others end a single shop's cycle.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid shop id {0:?}: only letters, digits, '-' and '_' are allowed")]
    InvalidShopId(String),

    #[error("snapshot i/o failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize snapshot for shop {shop_id}: {source}")]
    Serialize {
        shop_id: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("response from {url} is not valid listings json: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("listing #{index} in the response has no usable listing_id")]
    MalformedListing { index: usize },
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    // kept as an error so a transient empty response never wipes a real snapshot
    #[error("No Listings: {shop_id} has no listings")]
    Empty { shop_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("api key is missing or blank")]
    MissingApiKey,

    #[error("no shop ids configured")]
    NoShops,
}
