//! Execution context for filter evaluation

#[cfg(test)]
use mockall::automock;

/// Read access to a single index segment.
///
/// Filters are evaluated against one segment at a time; how the segment is
/// stored and scanned is up to the implementation.
#[cfg_attr(test, automock)]
pub trait SegmentReader: Send + Sync {
    /// Name of the segment, unique within an index
    fn segment_name(&self) -> String;

    /// One greater than the largest document id in the segment
    fn max_doc(&self) -> u32;
}
