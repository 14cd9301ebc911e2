//! Axis-aligned bounding boxes with one `(min, max)` pair per dimension.

use tinyvec::TinyVec;

use crate::points::PointSet;
use crate::r#type::Scalar;

/// Per-dimension coordinate storage; inline for dimensionalities up to 4.
pub(crate) type CoordVec<N> = TinyVec<[N; 4]>;

/// An axis-aligned bounding box.
///
/// Boxes are not stored per tree node; queries carry one box and tighten a
/// single bound on each descent step, so a box here is always a superset of
/// the true extent of the points below the node it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb<N: Scalar> {
    min: CoordVec<N>,
    max: CoordVec<N>,
}

impl<N: Scalar> Aabb<N> {
    /// A box from per-dimension lower and upper bound slices.
    ///
    /// Both slices must have the same length.
    pub fn new(min: &[N], max: &[N]) -> Self {
        debug_assert_eq!(min.len(), max.len());
        Self {
            min: min.iter().copied().collect(),
            max: max.iter().copied().collect(),
        }
    }

    /// The tight bounding box of an entire point set.
    pub(crate) fn from_points<P: PointSet<Scalar = N>>(points: &P) -> Self {
        let num_dims = points.num_dims();
        let mut min: CoordVec<N> = CoordVec::new();
        let mut max: CoordVec<N> = CoordVec::new();
        min.resize(num_dims, N::max_value());
        max.resize(num_dims, N::min_value());

        for index in 0..points.num_points() {
            for dim in 0..num_dims {
                let c = points.coord(index, dim);
                if c < min[dim] {
                    min[dim] = c;
                }
                if c > max[dim] {
                    max[dim] = c;
                }
            }
        }

        Self { min, max }
    }

    /// The number of dimensions of this box.
    pub fn num_dims(&self) -> usize {
        self.min.len()
    }

    /// The lower bound on `dim`.
    #[inline]
    pub fn min(&self, dim: usize) -> N {
        self.min[dim]
    }

    /// The upper bound on `dim`.
    #[inline]
    pub fn max(&self, dim: usize) -> N {
        self.max[dim]
    }

    #[inline]
    pub(crate) fn set_min(&mut self, dim: usize, value: N) {
        self.min[dim] = value;
    }

    #[inline]
    pub(crate) fn set_max(&mut self, dim: usize, value: N) {
        self.max[dim] = value;
    }

    /// The dimension with the largest extent; ties pick the lowest
    /// dimension.
    pub(crate) fn longest_dim(&self) -> usize {
        let mut dim = 0;
        let mut extent = self.max[0] - self.min[0];
        for d in 1..self.num_dims() {
            let e = self.max[d] - self.min[d];
            if e > extent {
                dim = d;
                extent = e;
            }
        }
        dim
    }

    /// Whether this box and `other` share any volume, boundaries included.
    pub(crate) fn intersects(&self, other: &Aabb<N>) -> bool {
        (0..self.num_dims())
            .all(|d| self.min[d] <= other.max[d] && self.max[d] >= other.min[d])
    }

    /// Whether `other` lies entirely inside this box.
    pub(crate) fn contains(&self, other: &Aabb<N>) -> bool {
        (0..self.num_dims())
            .all(|d| self.min[d] <= other.min[d] && other.max[d] <= self.max[d])
    }
}
