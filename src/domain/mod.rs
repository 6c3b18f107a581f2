//! Domain layer - cache keys and the filters they identify

pub mod cache;
pub mod error;
pub mod filter;

pub use cache::{CacheKey, CacheKeyFilter, CacheKeyParams};
pub use error::DomainError;
pub use filter::{DocIdSet, Filter, KeyedFilter, KeyedFilterExt, SegmentReader};
