//! A bucket k-d tree: points live only in leaves, up to
//! [`MAX_POINTS_PER_BUCKET`] per leaf.
//!
//! An overflowing leaf splits along the dimension with the greatest
//! coordinate range, at the mean coordinate of that dimension. Removals
//! shrink the tree back: an internal node whose subtree drops below
//! [`MIN_POINTS_BEFORE_MERGE`] points folds its two leaves into itself.
//!
//! ## Example
//!
//! ```
//! use point_index::{BucketKdTree, Point, PointIndex};
//!
//! let mut tree = BucketKdTree::<2, f32>::new();
//! for i in 0..20 {
//!     tree.insert(&Point::new([i as f32 * 0.05, 0.5]));
//! }
//! assert_eq!(tree.total_points(), 20);
//! assert!(tree.query(&Point::new([0.05, 0.5])));
//! ```

mod index;

pub use index::{BucketKdTree, MAX_POINTS_PER_BUCKET, MIN_POINTS_BEFORE_MERGE};

#[cfg(test)]
mod test;
