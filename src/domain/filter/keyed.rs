//! Filter decorator carrying an explicit cache key

use std::fmt;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use tracing::{debug, trace};

use super::{DocIdSet, Filter, SegmentReader};
use crate::domain::DomainError;
use crate::domain::cache::{CacheKey, CacheKeyFilter};

/// Wraps a filter together with the key its results are cached under.
///
/// Evaluation is forwarded to the wrapped filter untouched. Equality,
/// hashing and `Display` are those of the wrapped filter; the key does not
/// take part in them. Use [`CacheKeyFilter::cache_key`] for cache lookups.
#[derive(Debug, Clone)]
pub struct KeyedFilter<F> {
    filter: F,
    key: CacheKey,
}

impl<F> KeyedFilter<F> {
    pub fn new(filter: F, key: CacheKey) -> Self {
        Self { filter, key }
    }

    /// Returns the wrapped filter
    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn into_parts(self) -> (F, CacheKey) {
        (self.filter, self.key)
    }
}

impl<F> CacheKeyFilter for KeyedFilter<F> {
    fn cache_key(&self) -> &CacheKey {
        &self.key
    }
}

impl<F: PartialEq> PartialEq for KeyedFilter<F> {
    fn eq(&self, other: &Self) -> bool {
        self.filter == other.filter
    }
}

impl<F: Eq> Eq for KeyedFilter<F> {}

/// A wrapper equals a bare filter with the same content
impl<F: PartialEq> PartialEq<F> for KeyedFilter<F> {
    fn eq(&self, other: &F) -> bool {
        self.filter == *other
    }
}

impl<F: Hash> Hash for KeyedFilter<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filter.hash(state);
    }
}

impl<F: fmt::Display> fmt::Display for KeyedFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.filter, f)
    }
}

#[async_trait]
impl<F: Filter> Filter for KeyedFilter<F> {
    async fn doc_id_set(&self, reader: &dyn SegmentReader) -> Result<DocIdSet, DomainError> {
        trace!(cache_key = %self.key.short_fingerprint(16), "Evaluating keyed filter");

        self.filter.doc_id_set(reader).await.inspect_err(|e| {
            debug!(
                cache_key = %self.key.short_fingerprint(16),
                error = %e,
                "Keyed filter evaluation failed"
            );
        })
    }
}

/// Extension trait attaching a cache key to any filter
pub trait KeyedFilterExt: Filter + Sized {
    fn with_cache_key(self, key: impl Into<CacheKey>) -> KeyedFilter<Self> {
        KeyedFilter::new(self, key.into())
    }
}

impl<F: Filter> KeyedFilterExt for F {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheKeyParams;
    use crate::domain::filter::MockSegmentReader;
    use crate::domain::filter::mock::MockFilter;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;

    fn segment(max_doc: u32) -> MockSegmentReader {
        let mut reader = MockSegmentReader::new();
        reader.expect_max_doc().return_const(max_doc);
        reader
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_cache_key_is_the_supplied_key() {
        let key = CacheKey::from("term:title=rust");
        let keyed = KeyedFilter::new(MockFilter::new("title"), key.clone());

        assert_eq!(keyed.cache_key(), &key);
        assert_eq!(keyed.cache_key().bytes().as_ptr(), key.bytes().as_ptr());
    }

    #[test]
    fn test_equality_ignores_key() {
        let filter = MockFilter::new("title").with_docs(vec![1, 2]);
        let a = KeyedFilter::new(filter.clone(), CacheKey::from("a"));
        let b = KeyedFilter::new(filter.clone(), CacheKey::from("b"));

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&a), hash_of(&filter));
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_different_filters_same_key_are_not_equal() {
        let key = CacheKey::from("shared");
        let a = KeyedFilter::new(MockFilter::new("a"), key.clone());
        let b = KeyedFilter::new(MockFilter::new("b"), key);

        assert_ne!(a, b);
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_equal_to_bare_filter() {
        let filter = MockFilter::new("title");
        let keyed = filter.clone().with_cache_key("k");

        assert!(keyed == filter);
        assert!(keyed != MockFilter::new("body"));
        assert!(keyed == filter.clone().with_cache_key("other"));
    }

    #[test]
    fn test_dedup_and_cache_use_different_identities() {
        let filter = MockFilter::new("title");
        let first = filter.clone().with_cache_key("k1");
        let second = filter.with_cache_key("k2");

        let unique: HashSet<_> = [first.clone(), second.clone()].into_iter().collect();
        assert_eq!(unique.len(), 1);

        let mut cache: HashMap<CacheKey, DocIdSet> = HashMap::new();
        cache.insert(first.cache_key().clone(), DocIdSet::empty());
        cache.insert(second.cache_key().clone(), DocIdSet::empty());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_display_delegates_to_filter() {
        let keyed = MockFilter::new("title").with_cache_key("secret-key");

        assert_eq!(keyed.to_string(), "mock(title)");
    }

    #[test]
    fn test_with_cache_key_from_params() {
        let params = CacheKeyParams::new("term").with_component("field", "title");
        let keyed = MockFilter::new("title").with_cache_key(&params);

        assert_eq!(keyed.cache_key().as_utf8().unwrap(), "term:field=title");
    }

    #[test]
    fn test_into_parts() {
        let keyed = KeyedFilter::new(MockFilter::new("title"), CacheKey::from("k"));
        let (filter, key) = keyed.into_parts();

        assert_eq!(filter, MockFilter::new("title"));
        assert_eq!(key, CacheKey::from("k"));
    }

    #[tokio::test]
    async fn test_empty_segment_evaluates_like_delegate() {
        let filter = MockFilter::new("title").with_docs(vec![0, 1, 2]);
        let keyed = filter.clone().with_cache_key("k");
        let reader = segment(0);

        let bare = filter.doc_id_set(&reader).await.unwrap();
        let wrapped = keyed.doc_id_set(&reader).await.unwrap();

        assert!(wrapped.is_empty());
        assert_eq!(wrapped, bare);
    }

    #[tokio::test]
    async fn test_evaluation_forwards_results() {
        let filter = MockFilter::new("title").with_docs(vec![4, 1, 9]);
        let keyed = filter.with_cache_key("k");

        let docs = keyed.doc_id_set(&segment(5)).await.unwrap();
        assert_eq!(docs.as_slice(), &[1, 4]);
    }

    #[tokio::test]
    async fn test_io_failure_propagates_unchanged() {
        let keyed = MockFilter::new("title")
            .with_io_failure("read past EOF in _0.cfs")
            .with_cache_key("k");

        let result = keyed.doc_id_set(&segment(5)).await;

        match result {
            Err(DomainError::Io { message }) => assert_eq!(message, "read past EOF in _0.cfs"),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shared_delegate() {
        let shared = Arc::new(MockFilter::new("title").with_docs(vec![3]));
        let a = Arc::clone(&shared).with_cache_key("a");
        let b = Arc::clone(&shared).with_cache_key("b");
        let reader = segment(10);

        assert_eq!(a, b);
        assert_eq!(
            a.doc_id_set(&reader).await.unwrap(),
            b.doc_id_set(&reader).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_usable_across_tasks() {
        let keyed = Arc::new(MockFilter::new("title").with_docs(vec![1]).with_cache_key("k"));

        let handle = tokio::spawn({
            let keyed = Arc::clone(&keyed);
            async move {
                let reader = segment(2);
                keyed.doc_id_set(&reader).await
            }
        });

        let docs = handle.await.unwrap().unwrap();
        assert_eq!(docs.as_slice(), &[1]);
        assert_eq!(keyed.cache_key(), &CacheKey::from("k"));
    }

    #[test]
    fn test_cache_key_through_trait_object() {
        let keyed: Box<dyn CacheKeyFilter> =
            Box::new(MockFilter::new("title").with_cache_key("k"));

        assert_eq!(keyed.cache_key(), &CacheKey::from("k"));
    }
}
