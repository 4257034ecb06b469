use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during primitive construction
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported topology length: {0} (expected 2, 3, 4, 6 or 8)")]
    UnsupportedTopology(usize),

    #[error("2-node topology builds a segment, not a face")]
    SegmentTopology,

    #[error("position count {actual} does not match the classified shape ({expected} vertices)")]
    PositionCountMismatch { expected: usize, actual: usize },
}
