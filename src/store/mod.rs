//! JSON snapshot storage.
//!
//! Persists one snapshot per shop as `<root>/<shop_id>.json`:
//! - Missing file means first run, loads as an empty snapshot
//! - Writes go through a temp file in the same directory and an atomic rename
//! - The root directory is created on first save
//!
//! Different shops never share a file, so saves for different shops can run
//! side by side. Load and save for the same shop are expected to be serialized
//! by the caller.

pub mod diff;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreError;
use crate::listing::Snapshot;

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SnapshotStore { root: root.into() }
    }

    /// File backing the snapshot of `shop_id`.
    pub fn path_for(&self, shop_id: &str) -> Result<PathBuf, StoreError> {
        validate_shop_id(shop_id)?;
        Ok(self.root.join(format!("{shop_id}.json")))
    }

    /// Load the last saved snapshot for a shop, or an empty one if none exists.
    pub fn load(&self, shop_id: &str) -> Result<Snapshot, StoreError> {
        let path = self.path_for(shop_id)?;

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(shop_id, path = %path.display(), "no stored snapshot, starting empty");
                return Ok(Snapshot::new());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let snapshot: Snapshot = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;

        debug!(shop_id, listings = snapshot.len(), "loaded stored snapshot");
        Ok(snapshot)
    }

    /// Whether a snapshot has ever been saved for this shop.
    pub fn exists(&self, shop_id: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(shop_id)?.is_file())
    }

    /// Replace the stored snapshot for a shop.
    ///
    /// The previous file stays intact unless the new one was fully written.
    pub fn save(&self, shop_id: &str, snapshot: &Snapshot) -> Result<(), StoreError> {
        let path = self.path_for(shop_id)?;

        let mut json = serde_json::to_string_pretty(snapshot).map_err(|source| {
            StoreError::Serialize {
                shop_id: shop_id.to_string(),
                source,
            }
        })?;
        json.push('\n');

        // each error names the path that failed
        let root_err = |source| StoreError::Io { path: self.root.clone(), source };

        fs::create_dir_all(&self.root).map_err(root_err)?;
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(root_err)?;

        let tmp_path = tmp.path().to_path_buf();
        let tmp_err = |source| StoreError::Io { path: tmp_path.clone(), source };
        tmp.write_all(json.as_bytes()).map_err(tmp_err)?;
        tmp.as_file().sync_all().map_err(tmp_err)?;

        tmp.persist(&path).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(shop_id, path = %path.display(), listings = snapshot.len(), "snapshot written");
        Ok(())
    }
}

/// Shop ids become file names, so anything that could escape the root is refused.
fn validate_shop_id(shop_id: &str) -> Result<(), StoreError> {
    let valid = !shop_id.is_empty()
        && shop_id.len() <= 128
        && shop_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidShopId(shop_id.to_string()))
    }
}
