//! Hash-based index structures.
//!
//! [`HashIndex`] is the shared substrate: it hashes every point to a
//! one-dimensional [`HashKey`][crate::HashKey] and keeps all points with the
//! same key in a bucket, alongside their precomputed coordinate sums so
//! membership scans can skip most candidates cheaply.
//!
//! Two hashers are provided. [`PyramidTree`] projects points to a scalar
//! pyramid value with the Pyramid-Technique of Berchtold, Böhm and Kriegel
//! (1998). [`BitHash`] folds the raw coordinate bit patterns into the key;
//! it is fast but only exact when logically-equal points are bit-identical,
//! making it an opt-in tool for bit-deterministic workloads rather than a
//! general index.

mod bithash;
mod index;
mod pyramid;

pub use bithash::{BitHash, BitHasher};
pub use index::{HashIndex, PointHasher};
pub use pyramid::{PyramidHasher, PyramidTree};
