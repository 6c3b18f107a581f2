//! Filter results

use serde::{Deserialize, Serialize};

/// Sorted, deduplicated set of document ids produced by a filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocIdSet {
    docs: Vec<u32>,
}

impl DocIdSet {
    /// Creates an empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the document is in the set
    pub fn contains(&self, doc: u32) -> bool {
        self.docs.binary_search(&doc).is_ok()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.docs.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.docs
    }
}

impl FromIterator<u32> for DocIdSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut docs: Vec<u32> = iter.into_iter().collect();
        docs.sort_unstable();
        docs.dedup();
        Self { docs }
    }
}

impl From<Vec<u32>> for DocIdSet {
    fn from(docs: Vec<u32>) -> Self {
        docs.into_iter().collect()
    }
}
