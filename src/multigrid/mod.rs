//! A Multigrid tree: a uniform grid that refines one dimension at a time.
//!
//! The boundary is divided into [`DEFAULT_INTERVALS_PER_DIMENSION`] equal
//! cells along each dimension, but a point is initially hashed by dimension 0
//! only. A cell holds at most `bucket_size` points; overflowing cells
//! subdivide by hashing the next dimension, until no dimensions remain and
//! the leaf simply grows. Points live in a tree-global arena; removals leave
//! tombstoned slots that later insertions reuse.
//!
//! ## Example
//!
//! ```
//! use point_index::{Boundary, Multigrid, Point, PointIndex};
//!
//! let mut grid = Multigrid::<2, f32>::new(Boundary::unit());
//! assert!(grid.insert(&Point::new([0.25, 0.75])));
//! assert!(grid.query(&Point::new([0.25, 0.75])));
//! assert_eq!(grid.num_points(), 1);
//! ```

mod index;

pub use index::{Multigrid, DEFAULT_BUCKET_SIZE, DEFAULT_INTERVALS_PER_DIMENSION};

#[cfg(test)]
mod test;
