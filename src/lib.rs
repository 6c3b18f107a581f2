//! keyed-filter
//!
//! Content-addressed identity for search filters:
//! - `CacheKey`: immutable byte-backed key with a precomputed hash
//! - `KeyedFilter`: decorator attaching a `CacheKey` to any `Filter`
//!   without changing how it evaluates or compares

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    CacheKey, CacheKeyFilter, CacheKeyParams, DocIdSet, DomainError, Filter, KeyedFilter,
    KeyedFilterExt, SegmentReader,
};
