//! Sequential pass over all configured shops.
//!
//! A failed shop never stops the pass; its outcome is handed to the sink like
//! any other and the next shop is processed.

use std::thread;
use std::time::Duration;

use tracing::info;

use crate::engine::{DiffEngine, ShopOutcome};
use crate::fetch::ListingSource;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub fn run_pass<S: ListingSource>(
    engine: &DiffEngine<S>,
    shop_ids: &[String],
    mut sink: impl FnMut(&ShopOutcome),
) -> PassSummary {
    let mut summary = PassSummary::default();

    for shop_id in shop_ids {
        let outcome = engine.run(shop_id);

        if outcome.is_success() {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
        }

        sink(&outcome);
    }

    info!(succeeded = summary.succeeded, failed = summary.failed, "pass complete");
    summary
}

/// Run passes forever, sleeping `every` between the end of one and the start of the next.
pub fn watch<S: ListingSource>(
    engine: &DiffEngine<S>,
    shop_ids: &[String],
    every: Duration,
    mut sink: impl FnMut(&ShopOutcome),
) -> ! {
    loop {
        run_pass(engine, shop_ids, &mut sink);
        info!(next_in = %humantime::format_duration(every), "waiting for next pass");
        thread::sleep(every);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::ListingsPage;
    use crate::store::SnapshotStore;
    use serde_json::json;
    use tempfile::TempDir;

    /// Fails for shop "bad", serves one listing for everyone else.
    struct PickySource;

    impl ListingSource for PickySource {
        fn fetch_listings(&self, shop_id: &str, _api_key: &str) -> Result<ListingsPage, FetchError> {
            if shop_id == "bad" {
                return Err(FetchError::Status {
                    status: 404,
                    url: format!("http://example.test/shops/{shop_id}"),
                });
            }
            Ok(ListingsPage {
                count: 1,
                results: vec![json!({"listing_id": 1, "title": shop_id})],
            })
        }
    }

    #[test]
    fn failures_do_not_stop_the_pass() {
        let dir = TempDir::new().unwrap();
        let engine = DiffEngine::new(SnapshotStore::new(dir.path()), PickySource, "k");
        let shops: Vec<String> = ["a", "bad", "c"].iter().map(|s| s.to_string()).collect();

        let mut seen = Vec::new();
        let summary = run_pass(&engine, &shops, |outcome| {
            seen.push((outcome.shop_id().to_string(), outcome.is_success()));
        });

        assert_eq!(summary, PassSummary { succeeded: 2, failed: 1 });
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), true),
                ("bad".to_string(), false),
                ("c".to_string(), true),
            ]
        );
        assert!(dir.path().join("a.json").exists());
        assert!(!dir.path().join("bad.json").exists());
        assert!(dir.path().join("c.json").exists());
    }

    #[test]
    fn invalid_shop_id_is_just_another_failure() {
        let dir = TempDir::new().unwrap();
        let engine = DiffEngine::new(SnapshotStore::new(dir.path()), PickySource, "k");
        let shops = vec!["../escape".to_string(), "ok".to_string()];

        let summary = run_pass(&engine, &shops, |_| {});

        assert_eq!(summary, PassSummary { succeeded: 1, failed: 1 });
    }
}
