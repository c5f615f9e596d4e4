//! In-memory exact-match indexes over fixed-dimensionality points.
//!
//! Every structure stores a set of `D`-dimensional points of a floating
//! element type and supports three operations through [`PointIndex`]: insert
//! a point (rejecting duplicates), remove a point (reporting whether it was
//! present) and test membership. Point equality is coordinate-wise under a
//! fixed tolerance (see [`Element::TOLERANCE`]).
//!
//! Four non-trivial structures are provided, plus one degenerate one:
//!
//! - [`KdTree`]: the classic point k-d tree of Bentley (1975).
//! - [`BucketKdTree`]: a k-d tree holding up to eight points per leaf, with
//!   range-based splits and bottom-up merges.
//! - [`PyramidTree`]: the Pyramid-Technique of Berchtold, Böhm and Kriegel
//!   (1998), hashing points to scalar pyramid values over a fixed boundary.
//! - [`Multigrid`]: a uniform grid refined one dimension at a time, with an
//!   arena-backed point store.
//! - [`BitHash`]: a hash over raw coordinate bit patterns; exact only for
//!   bit-deterministic workloads.
//!
//! ## Example
//!
//! ```
//! use point_index::{Boundary, Multigrid, Point, PointIndex, PyramidTree};
//!
//! let points = [
//!     Point::new([0.1f32, 0.2, 0.3]),
//!     Point::new([0.9, 0.8, 0.7]),
//! ];
//!
//! // The boundary-taking structures cover the unit cube here.
//! let mut pyramid = PyramidTree::<3, f32>::new(Boundary::unit());
//! let mut grid = Multigrid::<3, f32>::new(Boundary::unit());
//!
//! for point in &points {
//!     assert!(pyramid.insert(point));
//!     assert!(grid.insert(point));
//! }
//! assert!(pyramid.query(&points[0]));
//! assert!(grid.remove(&points[1]));
//! assert!(!grid.query(&points[1]));
//! ```

pub mod boundary;
pub mod bucket_kdtree;
pub mod dataset;
mod error;
pub mod hash;
pub mod kdtree;
pub mod multigrid;
pub mod point;
pub mod r#trait;
pub mod r#type;

pub use boundary::{Boundary, Interval};
pub use bucket_kdtree::BucketKdTree;
pub use dataset::Dataset;
pub use error::{PointIndexError, Result};
pub use hash::{BitHash, HashIndex, PointHasher, PyramidTree};
pub use kdtree::KdTree;
pub use multigrid::Multigrid;
pub use point::Point;
pub use r#trait::PointIndex;
pub use r#type::{Element, HashKey};

#[cfg(test)]
pub(crate) mod test;
