//! Listing and snapshot data model.
//!
//! A listing is whatever object the marketplace returned, kept as-is so the
//! persisted snapshot round-trips every field. Only `listing_id` and `title`
//! are ever interpreted.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FetchError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing {
    fields: Map<String, Value>,
}

impl Listing {
    pub fn new(fields: Map<String, Value>) -> Self {
        Listing { fields }
    }

    /// The `listing_id` field as a string key. Numbers and non-empty strings
    /// are accepted, strings verbatim. Anything else (or a missing field)
    /// yields None.
    pub fn listing_id(&self) -> Option<String> {
        match self.fields.get("listing_id")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// All active listings of one shop at one point in time, keyed by listing id.
///
/// Backed by a BTreeMap so the file on disk has sorted keys and diffs well
/// under version control. Nothing relies on the ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    listings: BTreeMap<String, Listing>,
}

impl Snapshot {
    pub fn new() -> Self {
        Snapshot::default()
    }

    /// Insert or replace the listing stored under `id`.
    pub fn insert(&mut self, id: impl Into<String>, listing: Listing) -> Option<Listing> {
        self.listings.insert(id.into(), listing)
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.listings.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.listings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Title of the listing under `id`, empty when the listing or its title is missing.
    pub fn title_of(&self, id: &str) -> &str {
        self.get(id).and_then(Listing::title).unwrap_or("")
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a Listing);
    type IntoIter = btree_map::Iter<'a, String, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}

/// Build a snapshot from the raw `results` array of a listings response.
///
/// Later entries with the same listing id replace earlier ones. An entry that
/// is not a json object, or has no usable `listing_id`, fails the whole batch:
/// a partial snapshot would report the missing listings as removed.
pub fn normalize(raw: &[Value]) -> Result<Snapshot, FetchError> {
    let mut snapshot = Snapshot::new();

    for (index, value) in raw.iter().enumerate() {
        let Value::Object(fields) = value else {
            return Err(FetchError::MalformedListing { index });
        };

        let listing = Listing::new(fields.clone());
        let id = listing
            .listing_id()
            .ok_or(FetchError::MalformedListing { index })?;

        snapshot.insert(id, listing);
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_ids_become_string_keys() {
        let raw = vec![
            json!({"listing_id": 101, "title": "Mug"}),
            json!({"listing_id": 202, "title": "Bowl"}),
        ];

        let snapshot = normalize(&raw).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.title_of("101"), "Mug");
        assert_eq!(snapshot.title_of("202"), "Bowl");
    }

    #[test]
    fn string_ids_are_accepted() {
        let snapshot = normalize(&[json!({"listing_id": "77", "title": "Vase"})]).unwrap();
        assert!(snapshot.contains("77"));
    }

    #[test]
    fn string_ids_are_kept_verbatim() {
        let raw = vec![json!({"listing_id": " 7 "}), json!({"listing_id": 1.0})];

        let snapshot = normalize(&raw).unwrap();

        assert_eq!(snapshot.ids().collect::<Vec<_>>(), vec![" 7 ", "1.0"]);
        assert!(!snapshot.contains("7"));
    }

    #[test]
    fn empty_string_id_is_rejected() {
        let err = normalize(&[json!({"listing_id": ""})]).unwrap_err();
        assert!(matches!(err, FetchError::MalformedListing { index: 0 }));
    }

    #[test]
    fn duplicate_ids_last_write_wins() {
        let raw = vec![
            json!({"listing_id": 5, "title": "first", "price": "10.00"}),
            json!({"listing_id": 5, "title": "second"}),
        ];

        let snapshot = normalize(&raw).unwrap();

        assert_eq!(snapshot.len(), 1);
        let listing = snapshot.get("5").unwrap();
        assert_eq!(listing.title(), Some("second"));
        assert!(!listing.fields().contains_key("price"));
    }

    #[test]
    fn missing_listing_id_is_rejected() {
        let raw = vec![json!({"listing_id": 1}), json!({"title": "no id"})];

        let err = normalize(&raw).unwrap_err();
        assert!(matches!(err, FetchError::MalformedListing { index: 1 }));
    }

    #[test]
    fn non_object_entry_is_rejected() {
        let err = normalize(&[json!("just a string")]).unwrap_err();
        assert!(matches!(err, FetchError::MalformedListing { index: 0 }));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let raw = vec![json!({"listing_id": 9, "title": "Lamp", "tags": ["a", "b"], "quantity": 3})];

        let snapshot = normalize(&raw).unwrap();
        let fields = snapshot.get("9").unwrap().fields();

        assert_eq!(fields["tags"], json!(["a", "b"]));
        assert_eq!(fields["quantity"], json!(3));
    }

    #[test]
    fn missing_title_reads_as_empty() {
        let snapshot = normalize(&[json!({"listing_id": 3})]).unwrap();
        assert_eq!(snapshot.title_of("3"), "");
        assert_eq!(snapshot.title_of("does-not-exist"), "");
    }

    #[test]
    fn empty_results_give_empty_snapshot() {
        assert!(normalize(&[]).unwrap().is_empty());
    }
}
