//! Splitting strategies used while building the tree.
//!
//! A splitter reorders a subrange of the permutation in place so that the
//! points on each side of the returned split plane are contiguous. The
//! strategy is chosen as a type parameter of
//! [`KdTreeBuilder::finish`][crate::kdtree::KdTreeBuilder::finish].

use std::cmp::Ordering;
use std::ops::Range;

use crate::kdtree::bounds::Aabb;
use crate::points::PointSet;
use crate::r#type::{PermIndex, Scalar};

/// The outcome of splitting a subrange of the permutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split<N> {
    /// The dimension the subrange was split on.
    pub dim: usize,
    /// The absolute position in the permutation where the right half
    /// begins. Always strictly inside the subrange, so neither side is
    /// empty.
    pub index: usize,
    /// The coordinate value separating the two halves on `dim`.
    pub value: N,
}

/// A strategy that picks a split plane for a subrange of the permutation
/// and partitions the subrange around it.
pub trait Splitter<N: Scalar> {
    /// Split `indices[range]`, reordering it in place.
    ///
    /// `bounds` is the box inherited from the ancestors of the subrange,
    /// a superset of the extent of the points in it. The subrange holds at
    /// least two points.
    fn split<P, I>(points: &P, indices: &mut [I], range: Range<usize>, bounds: &Aabb<N>) -> Split<N>
    where
        P: PointSet<Scalar = N>,
        I: PermIndex;
}

/// Splits on the dimension with the largest bounding-box extent, at the
/// exact median of the subrange.
///
/// Subtree sizes are balanced to within one point regardless of the data
/// distribution, at the cost of ignoring spatial locality beyond balance.
/// Expected linear time in the subrange size (selection, not a sort).
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestMedian;

impl<N: Scalar> Splitter<N> for LongestMedian {
    fn split<P, I>(points: &P, indices: &mut [I], range: Range<usize>, bounds: &Aabb<N>) -> Split<N>
    where
        P: PointSet<Scalar = N>,
        I: PermIndex,
    {
        let dim = bounds.longest_dim();
        let sub = &mut indices[range.clone()];
        let median = sub.len() / 2;

        sub.select_nth_unstable_by(median, |&a, &b| {
            points
                .coord(a.to_usize(), dim)
                .partial_cmp(&points.coord(b.to_usize(), dim))
                .unwrap_or(Ordering::Equal)
        });

        Split {
            dim,
            index: range.start + median,
            value: points.coord(sub[median].to_usize(), dim),
        }
    }
}

/// Splits on the dimension with the largest bounding-box extent, at the
/// arithmetic midpoint of that extent.
///
/// When every point falls on one side of the midpoint, the split slides to
/// the data extreme and isolates a single point on the sparse side, so both
/// children are always non-empty — including when all points share one
/// coordinate on the split dimension, in which case everything slides left
/// and one point is isolated on the right. Favors spatial locality over
/// balance; subtree sizes can be skewed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingMidpoint;

impl<N: Scalar> Splitter<N> for SlidingMidpoint {
    fn split<P, I>(points: &P, indices: &mut [I], range: Range<usize>, bounds: &Aabb<N>) -> Split<N>
    where
        P: PointSet<Scalar = N>,
        I: PermIndex,
    {
        let dim = bounds.longest_dim();
        let mid = N::midpoint(bounds.min(dim), bounds.max(dim));
        let sub = &mut indices[range.clone()];
        let coord = |sub: &[I], pos: usize| points.coord(sub[pos].to_usize(), dim);

        // Partition: points at or below the midpoint move to the front.
        let mut split = 0;
        for pos in 0..sub.len() {
            if coord(sub, pos) <= mid {
                sub.swap(split, pos);
                split += 1;
            }
        }

        if split == sub.len() {
            // Every point sits at or below the midpoint. The split slides
            // to the upper data extreme: the first maximal point is
            // isolated at the end of the subrange and the split value
            // becomes that maximum.
            let last = sub.len() - 1;
            let mut largest = 0;
            for pos in 1..sub.len() {
                if coord(sub, pos) > coord(sub, largest) {
                    largest = pos;
                }
            }
            let value = coord(sub, largest);
            sub.swap(largest, last);
            Split {
                dim,
                index: range.start + last,
                value,
            }
        } else if split == 0 {
            // Every point sits above the midpoint. The split slides to the
            // lower data extreme: the first minimal point is isolated at
            // the front, and the split value becomes the smallest
            // coordinate still on the right side so that side's tightened
            // box keeps covering its points.
            let mut smallest = 0;
            for pos in 1..sub.len() {
                if coord(sub, pos) < coord(sub, smallest) {
                    smallest = pos;
                }
            }
            sub.swap(0, smallest);
            let mut value = coord(sub, 1);
            for pos in 2..sub.len() {
                let c = coord(sub, pos);
                if c < value {
                    value = c;
                }
            }
            Split {
                dim,
                index: range.start + 1,
                value,
            }
        } else {
            Split {
                dim,
                index: range.start + split,
                value: mid,
            }
        }
    }
}
