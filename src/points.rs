//! The read-only point accessor consumed by the index, plus adaptors for
//! common in-memory point layouts.
//!
//! The index never copies or owns coordinates; it borrows a `PointSet` for
//! its entire lifetime and reads coordinates on demand.

use crate::error::{PointIndexError, Result};
use crate::r#type::Scalar;

/// Read-only access to a fixed set of points with a fixed dimensionality.
///
/// The data behind an implementation must remain unchanged for as long as
/// any index built over it is alive; the index holds a shared borrow to
/// enforce this.
pub trait PointSet {
    /// The coordinate type of every point in the set.
    type Scalar: Scalar;

    /// The number of points in the set.
    fn num_points(&self) -> usize;

    /// The spatial dimension shared by every point in the set.
    fn num_dims(&self) -> usize;

    /// Coordinate `dim` of point `index`.
    ///
    /// Both arguments must be in range; adaptors index their backing
    /// storage directly.
    fn coord(&self, index: usize, dim: usize) -> Self::Scalar;
}

impl<N: Scalar, const D: usize> PointSet for &[[N; D]] {
    type Scalar = N;

    fn num_points(&self) -> usize {
        self.len()
    }

    fn num_dims(&self) -> usize {
        D
    }

    #[inline]
    fn coord(&self, index: usize, dim: usize) -> N {
        self[index][dim]
    }
}

impl<N: Scalar, const D: usize> PointSet for Vec<[N; D]> {
    type Scalar = N;

    fn num_points(&self) -> usize {
        self.len()
    }

    fn num_dims(&self) -> usize {
        D
    }

    #[inline]
    fn coord(&self, index: usize, dim: usize) -> N {
        self[index][dim]
    }
}

/// A [`PointSet`] over a flat row-major coordinate slice with a
/// runtime-chosen dimensionality.
///
/// Point `i` occupies `coords[i * num_dims..(i + 1) * num_dims]`.
#[derive(Debug, Clone, Copy)]
pub struct SlicePointSet<'a, N> {
    coords: &'a [N],
    num_dims: usize,
}

impl<'a, N: Scalar> SlicePointSet<'a, N> {
    /// Wrap a flat coordinate slice.
    ///
    /// Fails if `num_dims` is zero or `coords` is not a whole number of
    /// points.
    pub fn new(coords: &'a [N], num_dims: usize) -> Result<Self> {
        if num_dims == 0 {
            return Err(PointIndexError::ZeroDimension);
        }
        if coords.len() % num_dims != 0 {
            return Err(PointIndexError::DimensionMismatch {
                expected: num_dims,
                got: coords.len() % num_dims,
            });
        }
        Ok(Self { coords, num_dims })
    }
}

impl<N: Scalar> PointSet for SlicePointSet<'_, N> {
    type Scalar = N;

    fn num_points(&self) -> usize {
        self.coords.len() / self.num_dims
    }

    fn num_dims(&self) -> usize {
        self.num_dims
    }

    #[inline]
    fn coord(&self, index: usize, dim: usize) -> N {
        self.coords[index * self.num_dims + dim]
    }
}
