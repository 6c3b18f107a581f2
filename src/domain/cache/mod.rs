//! Cache domain - content-addressed keys for cacheable computations

mod key;
mod keyed;

pub use key::{CacheKey, CacheKeyParams};
pub use keyed::CacheKeyFilter;
