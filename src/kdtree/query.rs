//! Search algorithms over a built [`KdTree`].
//!
//! All three query classes descend the node arena depth-first while
//! maintaining a running bounding box: each step across a split plane
//! tightens exactly one bound, and radius/nearest-neighbor searches update
//! the matching per-dimension distance contribution instead of recomputing
//! the aggregate distance to the box.

use std::collections::BinaryHeap;

use num_traits::{One, Zero};

use crate::error::{PointIndexError, Result};
use crate::kdtree::bounds::{Aabb, CoordVec};
use crate::kdtree::index::{KdTree, Node, ROOT};
use crate::metric::Metric;
use crate::points::PointSet;
use crate::r#type::Scalar;

/// A point index paired with its distance to a query point.
///
/// Distances are in metric units, e.g. squared for
/// [`SquaredEuclidean`][crate::metric::SquaredEuclidean].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<N> {
    /// Index of the point in the point set the tree was built over.
    pub index: u32,
    /// Metric distance between the point and the query point.
    pub distance: N,
}

impl<N: Scalar> Eq for Neighbor<N> {}

impl<N: Scalar> Ord for Neighbor<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // The supported metrics never produce NaN from non-NaN input;
        // incomparable distances fall through to the index tie-break so
        // results stay deterministic.
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(self.index.cmp(&other.index))
    }
}

impl<N: Scalar> PartialOrd for Neighbor<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The k best candidates seen so far, worst on top.
struct CandidateList<N: Scalar> {
    heap: BinaryHeap<Neighbor<N>>,
    capacity: usize,
}

impl<N: Scalar> CandidateList<N> {
    fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// The distance no candidate may match or exceed, once the list is
    /// full. `None` while there is still room.
    #[inline]
    fn max_distance(&self) -> Option<N> {
        if self.heap.len() == self.capacity {
            self.heap.peek().map(|worst| worst.distance)
        } else {
            None
        }
    }

    #[inline]
    fn push(&mut self, candidate: Neighbor<N>) {
        if self.heap.len() < self.capacity {
            self.heap.push(candidate);
        } else if let Some(worst) = self.heap.peek() {
            // Equal distances evict only on a lower index, keeping the
            // result independent of traversal order.
            if candidate < *worst {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }
    }

    fn into_sorted(self) -> Vec<Neighbor<N>> {
        self.heap.into_sorted_vec()
    }
}

impl<'a, P: PointSet, M: Metric<P::Scalar>> KdTree<'a, P, M> {
    /// Search the index for points inside an axis-aligned box, boundaries
    /// included.
    ///
    /// Returns the indices of the matching points in no particular order.
    /// Fails if either bound does not match the dimensionality of the
    /// index.
    pub fn search_box(&self, min: &[P::Scalar], max: &[P::Scalar]) -> Result<Vec<u32>> {
        self.check_dims(min.len())?;
        self.check_dims(max.len())?;

        let query = Aabb::new(min, max);
        let mut results = Vec::new();
        let mut bounds = self.bounds.clone();
        self.box_search_node(ROOT, &mut bounds, &query, &mut results);
        Ok(results)
    }

    /// Search the index for points within `radius` of `query`, boundary
    /// included.
    ///
    /// The radius is in metric units: pass a squared radius when the index
    /// uses the squared Euclidean metric (see
    /// [`Metric::norm`]). Returns the indices of the matching points in no
    /// particular order.
    pub fn search_radius(&self, query: &[P::Scalar], radius: P::Scalar) -> Result<Vec<u32>> {
        self.check_dims(query.len())?;

        let (mut offsets, distance) = self.box_offsets(query);
        let mut results = Vec::new();
        if distance <= radius {
            self.radius_search_node(ROOT, query, radius, distance, &mut offsets, &mut results);
        }
        Ok(results)
    }

    /// Search the index for the `k` points nearest to `query`.
    ///
    /// Returns at most `k` neighbors sorted ascending by distance, with
    /// exact ties broken by ascending point index. `k = 0` returns an
    /// empty vector; `k >= num_points` returns every point.
    pub fn search_knn(&self, query: &[P::Scalar], k: usize) -> Result<Vec<Neighbor<P::Scalar>>> {
        self.knn_search(query, k, P::Scalar::one())
    }

    /// Search the index for `k` approximate nearest neighbors.
    ///
    /// A subtree is visited only if its minimum possible distance scaled
    /// by `max_error_ratio` can still beat the current k-th best, so each
    /// reported neighbor is at most `max_error_ratio` times farther than
    /// the true neighbor of its rank. The ratio is in metric units: for an
    /// allowed relative error `e`, pass `metric.norm(1 + e)`. A ratio of
    /// one degenerates to the exact search.
    pub fn search_approx_knn(
        &self,
        query: &[P::Scalar],
        k: usize,
        max_error_ratio: P::Scalar,
    ) -> Result<Vec<Neighbor<P::Scalar>>> {
        self.knn_search(query, k, max_error_ratio)
    }

    /// Search the index for the single point nearest to `query`.
    pub fn search_nearest(&self, query: &[P::Scalar]) -> Result<Neighbor<P::Scalar>> {
        let mut found = self.knn_search(query, 1, P::Scalar::one())?;
        // A built tree always holds at least one point.
        Ok(found.remove(0))
    }

    fn knn_search(
        &self,
        query: &[P::Scalar],
        k: usize,
        max_error_ratio: P::Scalar,
    ) -> Result<Vec<Neighbor<P::Scalar>>> {
        self.check_dims(query.len())?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut candidates = CandidateList::new(k.min(self.num_points()));
        let (mut offsets, distance) = self.box_offsets(query);
        self.knn_search_node(
            ROOT,
            query,
            max_error_ratio,
            distance,
            &mut offsets,
            &mut candidates,
        );
        Ok(candidates.into_sorted())
    }

    fn box_search_node(
        &self,
        node: u32,
        bounds: &mut Aabb<P::Scalar>,
        query: &Aabb<P::Scalar>,
        results: &mut Vec<u32>,
    ) {
        if !query.intersects(bounds) {
            return;
        }
        if query.contains(bounds) {
            // Every point below this node matches; skip the per-point
            // coordinate tests.
            self.report_subtree(node, results);
            return;
        }

        match self.nodes[node as usize] {
            Node::Leaf { begin, end } => {
                for pos in begin..end {
                    let index = self.indices.get(pos as usize);
                    let inside = (0..self.num_dims).all(|dim| {
                        let c = self.points.coord(index, dim);
                        query.min(dim) <= c && c <= query.max(dim)
                    });
                    if inside {
                        results.push(index as u32);
                    }
                }
            }
            Node::Branch {
                dim,
                value,
                left,
                right,
            } => {
                let old_max = bounds.max(dim);
                bounds.set_max(dim, value);
                self.box_search_node(left, bounds, query, results);
                bounds.set_max(dim, old_max);

                let old_min = bounds.min(dim);
                bounds.set_min(dim, value);
                self.box_search_node(right, bounds, query, results);
                bounds.set_min(dim, old_min);
            }
        }
    }

    /// Report every point below `node` without coordinate tests.
    fn report_subtree(&self, node: u32, results: &mut Vec<u32>) {
        match self.nodes[node as usize] {
            Node::Leaf { begin, end } => {
                for pos in begin..end {
                    results.push(self.indices.get(pos as usize) as u32);
                }
            }
            Node::Branch { left, right, .. } => {
                self.report_subtree(left, results);
                self.report_subtree(right, results);
            }
        }
    }

    fn radius_search_node(
        &self,
        node: u32,
        query: &[P::Scalar],
        radius: P::Scalar,
        node_distance: P::Scalar,
        offsets: &mut CoordVec<P::Scalar>,
        results: &mut Vec<u32>,
    ) {
        match self.nodes[node as usize] {
            Node::Leaf { begin, end } => {
                for pos in begin..end {
                    let index = self.indices.get(pos as usize);
                    if self.point_distance(query, index) <= radius {
                        results.push(index as u32);
                    }
                }
            }
            Node::Branch {
                dim,
                value,
                left,
                right,
            } => {
                let (near, far) = if query[dim] <= value {
                    (left, right)
                } else {
                    (right, left)
                };
                self.radius_search_node(near, query, radius, node_distance, offsets, results);

                // The far child's box is bounded by the split plane on
                // this dimension; swap in the contribution toward it.
                let old = offsets[dim];
                let new = self.metric.coord_distance(query[dim], value);
                let far_distance = node_distance - old + new;
                if far_distance <= radius {
                    offsets[dim] = new;
                    self.radius_search_node(far, query, radius, far_distance, offsets, results);
                    offsets[dim] = old;
                }
            }
        }
    }

    fn knn_search_node(
        &self,
        node: u32,
        query: &[P::Scalar],
        max_error_ratio: P::Scalar,
        node_distance: P::Scalar,
        offsets: &mut CoordVec<P::Scalar>,
        candidates: &mut CandidateList<P::Scalar>,
    ) {
        match self.nodes[node as usize] {
            Node::Leaf { begin, end } => {
                for pos in begin..end {
                    let index = self.indices.get(pos as usize);
                    candidates.push(Neighbor {
                        index: index as u32,
                        distance: self.point_distance(query, index),
                    });
                }
            }
            Node::Branch {
                dim,
                value,
                left,
                right,
            } => {
                let (near, far) = if query[dim] <= value {
                    (left, right)
                } else {
                    (right, left)
                };
                self.knn_search_node(
                    near,
                    query,
                    max_error_ratio,
                    node_distance,
                    offsets,
                    candidates,
                );

                let old = offsets[dim];
                let new = self.metric.coord_distance(query[dim], value);
                let far_distance = node_distance - old + new;
                // An equally-distant subtree is still visited: it may hold
                // a point that wins the index tie-break.
                let visit = match candidates.max_distance() {
                    Some(worst) => far_distance * max_error_ratio <= worst,
                    None => true,
                };
                if visit {
                    offsets[dim] = new;
                    self.knn_search_node(
                        far,
                        query,
                        max_error_ratio,
                        far_distance,
                        offsets,
                        candidates,
                    );
                    offsets[dim] = old;
                }
            }
        }
    }

    /// Metric distance between the query point and an indexed point.
    #[inline]
    fn point_distance(&self, query: &[P::Scalar], index: usize) -> P::Scalar {
        (0..self.num_dims).fold(P::Scalar::zero(), |acc, dim| {
            acc + self
                .metric
                .coord_distance(query[dim], self.points.coord(index, dim))
        })
    }

    /// Per-dimension metric contributions from the query point to the root
    /// bounding box, and their sum.
    ///
    /// Zero in every dimension where the query lies inside the box.
    fn box_offsets(&self, query: &[P::Scalar]) -> (CoordVec<P::Scalar>, P::Scalar) {
        let mut offsets: CoordVec<P::Scalar> = CoordVec::new();
        offsets.resize(self.num_dims, P::Scalar::zero());
        let mut distance = P::Scalar::zero();
        for dim in 0..self.num_dims {
            let v = query[dim];
            let offset = if v < self.bounds.min(dim) {
                self.metric.coord_distance(v, self.bounds.min(dim))
            } else if v > self.bounds.max(dim) {
                self.metric.coord_distance(v, self.bounds.max(dim))
            } else {
                P::Scalar::zero()
            };
            offsets[dim] = offset;
            distance = distance + offset;
        }
        (offsets, distance)
    }

    fn check_dims(&self, got: usize) -> Result<()> {
        if got != self.num_dims {
            return Err(PointIndexError::DimensionMismatch {
                expected: self.num_dims,
                got,
            });
        }
        Ok(())
    }
}
