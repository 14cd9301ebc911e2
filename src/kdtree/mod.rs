//! An immutable kd-tree over a borrowed point set.
//!
//! The tree is built once from a [`PointSet`][crate::points::PointSet] and
//! answers box, radius and (approximate) nearest-neighbor queries under a
//! pluggable [`Metric`][crate::metric::Metric]. Internally it owns only a
//! permutation of point indices and a flat node arena; point data is read
//! through the point set on every access and never copied.

#![warn(missing_docs)]

mod bounds;
mod builder;
mod index;
mod query;
mod split;

pub use bounds::Aabb;
pub use builder::{KdTreeBuilder, DEFAULT_LEAF_SIZE};
pub use index::KdTree;
pub use query::Neighbor;
pub use split::{LongestMedian, SlidingMidpoint, Split, Splitter};
