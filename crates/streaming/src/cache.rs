use std::collections::BTreeMap;

use formats::KmlDocument;

use crate::source::SourceKey;

/// Session-lifetime store of fetched KML documents.
///
/// Documents are immutable once inserted and live until the page goes away:
/// no eviction, no TTL. Keyed in a `BTreeMap` for stable traversal order.
#[derive(Debug, Default)]
pub struct KmlCache {
    entries: BTreeMap<SourceKey, KmlDocument>,
}

impl KmlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &SourceKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &SourceKey) -> Option<&KmlDocument> {
        self.entries.get(key)
    }

    /// First insertion wins; a document under a key is never replaced.
    pub fn insert(&mut self, key: SourceKey, doc: KmlDocument) {
        self.entries.entry(key).or_insert(doc);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
