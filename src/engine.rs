//! One fetch-and-compare cycle per shop.
//!
//! load previous snapshot → fetch → empty guard → normalize → save → diff.
//! Any failure aborts the cycle for that shop only and leaves its stored
//! snapshot untouched.

use tracing::{debug, info, warn};

use crate::error::CycleError;
use crate::fetch::ListingSource;
use crate::listing::{normalize, Snapshot};
use crate::store::diff::{compute_delta, Delta};
use crate::store::SnapshotStore;

/// Result of a completed cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub shop_id: String,
    pub previous: Snapshot,
    pub current: Snapshot,
    pub delta: Delta,
}

#[derive(Debug)]
pub enum ShopOutcome {
    Reported(CycleReport),
    Aborted { shop_id: String, error: CycleError },
}

impl ShopOutcome {
    pub fn shop_id(&self) -> &str {
        match self {
            ShopOutcome::Reported(report) => &report.shop_id,
            ShopOutcome::Aborted { shop_id, .. } => shop_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ShopOutcome::Reported(_))
    }
}

pub struct DiffEngine<S> {
    store: SnapshotStore,
    source: S,
    api_key: String,
}

impl<S: ListingSource> DiffEngine<S> {
    pub fn new(store: SnapshotStore, source: S, api_key: impl Into<String>) -> Self {
        DiffEngine {
            store,
            source,
            api_key: api_key.into(),
        }
    }

    /// Same engine, different credential.
    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        DiffEngine {
            api_key: api_key.into(),
            ..self
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Run a cycle and propagate whatever aborted it.
    pub fn run_cycle(&self, shop_id: &str) -> Result<CycleReport, CycleError> {
        let previous = self.store.load(shop_id)?;
        debug!(shop_id, listings = previous.len(), "previous snapshot loaded");

        let page = self.source.fetch_listings(shop_id, &self.api_key)?;
        if page.is_empty() {
            return Err(CycleError::Empty {
                shop_id: shop_id.to_string(),
            });
        }

        let current = normalize(&page.results)?;
        debug!(shop_id, listings = current.len(), "listings normalized");

        self.store.save(shop_id, &current)?;
        info!(shop_id, listings = current.len(), "snapshot saved");

        let delta = compute_delta(&previous, &current);
        debug!(
            shop_id,
            added = delta.added.len(),
            removed = delta.removed.len(),
            "delta computed"
        );

        Ok(CycleReport {
            shop_id: shop_id.to_string(),
            previous,
            current,
            delta,
        })
    }

    /// Run a cycle, turning any failure into an aborted outcome instead of an error.
    pub fn run(&self, shop_id: &str) -> ShopOutcome {
        match self.run_cycle(shop_id) {
            Ok(report) => ShopOutcome::Reported(report),
            Err(error) => {
                warn!(shop_id, error = %error, "cycle aborted");
                ShopOutcome::Aborted {
                    shop_id: shop_id.to_string(),
                    error,
                }
            }
        }
    }
}
