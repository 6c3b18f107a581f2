use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use super::{DocIdSet, SegmentReader};
use crate::domain::DomainError;

/// A computation that selects documents from an index segment
#[async_trait]
pub trait Filter: Send + Sync + Debug {
    /// Evaluates the filter against one segment
    async fn doc_id_set(&self, reader: &dyn SegmentReader) -> Result<DocIdSet, DomainError>;
}

#[async_trait]
impl<F: Filter + ?Sized> Filter for Arc<F> {
    async fn doc_id_set(&self, reader: &dyn SegmentReader) -> Result<DocIdSet, DomainError> {
        (**self).doc_id_set(reader).await
    }
}

#[async_trait]
impl<F: Filter + ?Sized> Filter for Box<F> {
    async fn doc_id_set(&self, reader: &dyn SegmentReader) -> Result<DocIdSet, DomainError> {
        (**self).doc_id_set(reader).await
    }
}
