//! Snapshot comparison.
//!
//! Compares two snapshots by listing id only:
//! - added: ids present in the new snapshot but not the old one
//! - removed: ids present in the old snapshot but not the new one
//!
//! Listings present in both are never reported, even if their fields changed.

use std::collections::HashSet;

use crate::listing::Snapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub added: HashSet<String>,
    pub removed: HashSet<String>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Added ids in ascending order, for output that should be stable.
    pub fn added_sorted(&self) -> Vec<&str> {
        sorted(&self.added)
    }

    /// Removed ids in ascending order, for output that should be stable.
    pub fn removed_sorted(&self) -> Vec<&str> {
        sorted(&self.removed)
    }
}

fn sorted(ids: &HashSet<String>) -> Vec<&str> {
    let mut ids: Vec<&str> = ids.iter().map(String::as_str).collect();
    // numeric ids first in numeric order, anything else after in string order
    ids.sort_by_key(|id| match id.parse::<u64>() {
        Ok(n) => (false, n, *id),
        Err(_) => (true, 0, *id),
    });
    ids
}

/// Compute which listing ids appeared and disappeared between two snapshots
pub fn compute_delta(old: &Snapshot, new: &Snapshot) -> Delta {
    let old_ids: HashSet<&str> = old.ids().collect();
    let new_ids: HashSet<&str> = new.ids().collect();

    let added = new_ids
        .difference(&old_ids)
        .map(|id| id.to_string())
        .collect();

    let removed = old_ids
        .difference(&new_ids)
        .map(|id| id.to_string())
        .collect();

    Delta { added, removed }
}
