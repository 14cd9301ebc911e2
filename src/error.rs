use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum PointIndexError {
    /// An index cannot be built over zero points.
    #[error("Cannot build an index over an empty point set.")]
    EmptyPointSet,

    /// The point set reported a dimensionality of zero.
    #[error("Point set dimension must be at least 1.")]
    ZeroDimension,

    /// The configured leaf size was zero.
    #[error("Leaf size must be at least 1.")]
    InvalidLeafSize,

    /// A coordinate sequence did not match the expected dimensionality.
    #[error("Dimension mismatch: expected {expected} dimensions, got {got}.")]
    DimensionMismatch {
        /// The dimensionality the index or adaptor expects.
        expected: usize,
        /// The dimensionality of the offending argument.
        got: usize,
    },
}

pub type Result<T> = std::result::Result<T, PointIndexError>;
