//! JSON output for shop outcomes.
//!
//! One object per line so a pass over many shops can be piped into jq.

use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::engine::ShopOutcome;
use crate::listing::Snapshot;

#[derive(Debug, Serialize)]
pub struct ListingChange<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ShopReport<'a> {
    Ok {
        shop_id: &'a str,
        added: Vec<ListingChange<'a>>,
        removed: Vec<ListingChange<'a>>,
    },
    Error {
        shop_id: &'a str,
        error: String,
    },
}

impl<'a> ShopReport<'a> {
    pub fn from_outcome(outcome: &'a ShopOutcome) -> Self {
        match outcome {
            ShopOutcome::Reported(report) => ShopReport::Ok {
                shop_id: &report.shop_id,
                added: changes(report.delta.added_sorted(), &report.current),
                removed: changes(report.delta.removed_sorted(), &report.previous),
            },
            ShopOutcome::Aborted { shop_id, error } => ShopReport::Error {
                shop_id,
                error: error.to_string(),
            },
        }
    }
}

fn changes<'a>(ids: Vec<&'a str>, snapshot: &'a Snapshot) -> Vec<ListingChange<'a>> {
    ids.into_iter()
        .map(|id| ListingChange {
            id,
            title: snapshot.title_of(id),
        })
        .collect()
}

pub fn render(outcome: &ShopOutcome) -> String {
    serde_json::to_string(&ShopReport::from_outcome(outcome))
        .unwrap_or_else(|e| encoding_failure(outcome.shop_id(), e))
}

/// Error line emitted when a report itself cannot be encoded.
fn encoding_failure(shop_id: &str, reason: impl fmt::Display) -> String {
    json!({
        "status": "error",
        "shop_id": shop_id,
        "error": format!("could not encode report: {reason}"),
    })
    .to_string()
}
