use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast};

/// A trait for numbers that can be used as point coordinates.
///
/// Implemented for the primitive float and integer types via the blanket
/// impl; distances, split values and bounding boxes are all expressed in
/// this type. `Send + Sync` is required so a built index can be queried
/// concurrently from multiple threads.
pub trait Scalar:
    Num + NumCast + Bounded + PartialOrd + Copy + Default + Debug + Send + Sync + 'static
{
    /// The value halfway between `lo` and `hi`, assuming `lo <= hi`.
    ///
    /// Computed as `lo + (hi - lo) / 2` so unsigned types cannot overflow.
    /// For integer types this truncates toward `lo`.
    fn midpoint(lo: Self, hi: Self) -> Self {
        lo + (hi - lo) / (Self::one() + Self::one())
    }
}

impl<T> Scalar for T where
    T: Num + NumCast + Bounded + PartialOrd + Copy + Default + Debug + Send + Sync + 'static
{
}

/// A trait for the integer types backing the permutation array.
///
/// This trait is sealed and cannot be implemented for external types: the
/// permutation is stored as `u16` for small point sets and `u32` otherwise,
/// and [`crate::indices::OwnedIndices`] enumerates exactly those two widths.
pub trait PermIndex: private::Sealed + Copy + Debug + Send + Sync + 'static {
    /// Narrow a point index for storage in the permutation.
    fn from_usize(value: usize) -> Self;

    /// Widen a permutation entry back to a point index.
    fn to_usize(self) -> usize;
}

impl PermIndex for u16 {
    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u16
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl PermIndex for u32 {
    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u32
    }

    #[inline]
    fn to_usize(self) -> usize {
        self as usize
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for u16 {}
    impl Sealed for u32 {}
}
