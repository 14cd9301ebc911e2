//! A builder to create a [`KdTree`].

use std::ops::Range;

use crate::error::{PointIndexError, Result};
use crate::indices::OwnedIndices;
use crate::kdtree::bounds::Aabb;
use crate::kdtree::index::{KdTree, Node};
use crate::kdtree::split::{Split, Splitter};
use crate::metric::{Metric, SquaredEuclidean};
use crate::points::PointSet;
use crate::r#type::PermIndex;

/// The default leaf size used by [`KdTreeBuilder::new`].
pub const DEFAULT_LEAF_SIZE: usize = 12;

/// A builder to create a [`KdTree`].
///
/// The splitting strategy is supplied to [`finish`][KdTreeBuilder::finish]
/// as a type parameter; leaf size and metric are configured with chained
/// setters.
///
/// ```
/// use point_index::kdtree::{KdTreeBuilder, SlidingMidpoint};
///
/// let points: Vec<[f64; 2]> = vec![[2.0, 1.0], [4.0, 3.0], [8.0, 7.0]];
/// let tree = KdTreeBuilder::new(&points)
///     .leaf_size(1)
///     .finish::<SlidingMidpoint>()
///     .unwrap();
/// assert_eq!(tree.num_points(), 3);
/// ```
pub struct KdTreeBuilder<'a, P: PointSet, M: Metric<P::Scalar> = SquaredEuclidean> {
    points: &'a P,
    leaf_size: usize,
    metric: M,
}

impl<'a, P: PointSet> KdTreeBuilder<'a, P, SquaredEuclidean> {
    /// Create a new builder over the given point set, with the default
    /// leaf size and the squared Euclidean metric.
    pub fn new(points: &'a P) -> Self {
        Self {
            points,
            leaf_size: DEFAULT_LEAF_SIZE,
            metric: SquaredEuclidean,
        }
    }
}

impl<'a, P: PointSet, M: Metric<P::Scalar>> KdTreeBuilder<'a, P, M> {
    /// Set the maximum number of points stored in a leaf.
    ///
    /// Must be at least 1; validated by [`finish`][KdTreeBuilder::finish].
    pub fn leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Replace the metric used for radius and nearest-neighbor queries.
    pub fn metric<M2: Metric<P::Scalar>>(self, metric: M2) -> KdTreeBuilder<'a, P, M2> {
        KdTreeBuilder {
            points: self.points,
            leaf_size: self.leaf_size,
            metric,
        }
    }

    /// Consume this builder, partitioning the point set with the splitting
    /// strategy `S` and producing a tree ready for queries.
    ///
    /// Fails on an empty point set, a zero-dimensional point set, or a
    /// zero leaf size.
    pub fn finish<S: Splitter<P::Scalar>>(self) -> Result<KdTree<'a, P, M>> {
        let num_points = self.points.num_points();
        if num_points == 0 {
            return Err(PointIndexError::EmptyPointSet);
        }
        let num_dims = self.points.num_dims();
        if num_dims == 0 {
            return Err(PointIndexError::ZeroDimension);
        }
        if self.leaf_size == 0 {
            return Err(PointIndexError::InvalidLeafSize);
        }
        assert!(num_points <= u32::MAX as usize);

        let bounds = Aabb::from_points(self.points);
        let mut indices = OwnedIndices::identity(num_points);
        let mut nodes = Vec::with_capacity(2 * num_points / self.leaf_size + 1);

        // The box is tightened and restored in place during the recursion.
        let mut scratch = bounds.clone();
        match &mut indices {
            OwnedIndices::U16(perm) => {
                build_subtree::<_, S, _>(
                    self.points,
                    perm,
                    &mut nodes,
                    self.leaf_size,
                    0..num_points,
                    &mut scratch,
                );
            }
            OwnedIndices::U32(perm) => {
                build_subtree::<_, S, _>(
                    self.points,
                    perm,
                    &mut nodes,
                    self.leaf_size,
                    0..num_points,
                    &mut scratch,
                );
            }
        }

        Ok(KdTree {
            points: self.points,
            metric: self.metric,
            num_dims,
            leaf_size: self.leaf_size,
            indices,
            nodes,
            bounds,
        })
    }
}

/// Recursively subdivide `indices[range]`, appending the produced nodes to
/// the arena and returning the arena position of the subtree root.
///
/// The first call appends the root, so the root is always node 0.
fn build_subtree<P, S, I>(
    points: &P,
    indices: &mut [I],
    nodes: &mut Vec<Node<P::Scalar>>,
    leaf_size: usize,
    range: Range<usize>,
    bounds: &mut Aabb<P::Scalar>,
) -> u32
where
    P: PointSet,
    S: Splitter<P::Scalar>,
    I: PermIndex,
{
    if range.end - range.start <= leaf_size {
        nodes.push(Node::Leaf {
            begin: range.start as u32,
            end: range.end as u32,
        });
        return (nodes.len() - 1) as u32;
    }

    let Split { dim, index, value } = S::split(points, indices, range.clone(), bounds);

    // Reserve the slot so this subtree's root precedes its children, then
    // patch it once the child positions are known.
    let slot = nodes.len();
    nodes.push(Node::Leaf { begin: 0, end: 0 });

    let old_max = bounds.max(dim);
    bounds.set_max(dim, value);
    let left = build_subtree::<P, S, I>(points, indices, nodes, leaf_size, range.start..index, bounds);
    bounds.set_max(dim, old_max);

    let old_min = bounds.min(dim);
    bounds.set_min(dim, value);
    let right = build_subtree::<P, S, I>(points, indices, nodes, leaf_size, index..range.end, bounds);
    bounds.set_min(dim, old_min);

    nodes[slot] = Node::Branch {
        dim,
        value,
        left,
        right,
    };
    slot as u32
}
