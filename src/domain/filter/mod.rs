//! Filter domain - evaluation of filters against index segments

mod doc_id_set;
mod evaluate;
mod keyed;
mod reader;

pub use doc_id_set::DocIdSet;
pub use evaluate::Filter;
pub use keyed::{KeyedFilter, KeyedFilterExt};
pub use reader::SegmentReader;

#[cfg(test)]
pub use evaluate::mock;
#[cfg(test)]
pub use reader::MockSegmentReader;
