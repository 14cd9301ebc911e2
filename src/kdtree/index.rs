//! The tree structure produced by [`KdTreeBuilder`][crate::kdtree::KdTreeBuilder].

use crate::indices::{Indices, OwnedIndices};
use crate::kdtree::bounds::Aabb;
use crate::metric::Metric;
use crate::points::PointSet;

/// Position of the root node in the node arena.
pub(crate) const ROOT: u32 = 0;

/// A tree node: either a split plane or a contiguous run of points.
///
/// Nodes live in a flat arena and reference their children by arena
/// position, so the tree has no pointers and can be dropped in one free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Node<N> {
    Branch {
        /// Dimension the children are split over; always below the
        /// dimensionality of the index.
        dim: usize,
        /// Coordinate separating the children on `dim`.
        value: N,
        left: u32,
        right: u32,
    },
    Leaf {
        /// First permutation position belonging to this leaf.
        begin: u32,
        /// One past the last permutation position; always greater than
        /// `begin`.
        end: u32,
    },
}

/// An immutable nearest-neighbor index over a borrowed point set.
///
/// Built once by a [`KdTreeBuilder`][crate::kdtree::KdTreeBuilder] and
/// read-only afterwards. Every query allocates its own transient state, so
/// a built tree can be queried concurrently from any number of threads.
#[derive(Debug, Clone)]
pub struct KdTree<'a, P: PointSet, M: Metric<P::Scalar>> {
    pub(crate) points: &'a P,
    pub(crate) metric: M,
    pub(crate) num_dims: usize,
    pub(crate) leaf_size: usize,
    pub(crate) indices: OwnedIndices,
    pub(crate) nodes: Vec<Node<P::Scalar>>,
    pub(crate) bounds: Aabb<P::Scalar>,
}

impl<'a, P: PointSet, M: Metric<P::Scalar>> KdTree<'a, P, M> {
    /// The number of points the index was built over.
    pub fn num_points(&self) -> usize {
        self.indices.len()
    }

    /// The dimensionality of the indexed points.
    pub fn num_dims(&self) -> usize {
        self.num_dims
    }

    /// The configured maximum number of points per leaf.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The total number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// The bounding box of the whole point set.
    pub fn bounds(&self) -> &Aabb<P::Scalar> {
        &self.bounds
    }

    /// The metric the index was built with.
    ///
    /// Useful for converting plain values into metric units, e.g. a search
    /// radius via [`Metric::norm`].
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// The point set the index was built over.
    pub fn points(&self) -> &'a P {
        self.points
    }

    /// A view of the permutation of point indices backing the tree.
    ///
    /// A leaf node owns a contiguous subrange of this permutation.
    pub fn indices(&self) -> Indices<'_> {
        self.indices.as_view()
    }
}
