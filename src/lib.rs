#![doc = include_str!("../README.md")]

mod error;
pub mod indices;
pub mod kdtree;
pub mod metric;
pub mod points;
mod r#type;

pub use error::{PointIndexError, Result};
pub use r#type::{PermIndex, Scalar};
