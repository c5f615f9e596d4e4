use std::fmt;
use std::hash::{BuildHasher, Hasher};

use ahash::RandomState;

use crate::hash::index::{HashIndex, PointHasher};
use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::{Element, HashKey};

/// Folds the raw bit patterns of a point's coordinates into one 64-bit key.
#[derive(Clone, Default)]
pub struct BitHasher {
    state: RandomState,
}

impl fmt::Debug for BitHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BitHasher")
    }
}

impl<const D: usize, E: Element> PointHasher<D, E> for BitHasher {
    fn hash_point(&self, point: &Point<D, E>) -> HashKey {
        let mut hasher = self.state.build_hasher();
        for d in 0..D {
            hasher.write_u64(point[d].to_key_bits());
        }
        hasher.finish() as HashKey
    }
}

/// Degenerate hash index keyed by raw coordinate bit patterns.
///
/// Fast and exact only while two logically-equal points carry identical bit
/// patterns: any floating-point drift sends the drifted point to a different
/// bucket, and both copies survive. An opt-in tool for bit-deterministic
/// workloads, not a general index.
#[derive(Debug, Clone)]
pub struct BitHash<const D: usize, E: Element> {
    store: HashIndex<D, E, BitHasher>,
}

impl<const D: usize, E: Element> Default for BitHash<D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, E: Element> BitHash<D, E> {
    /// Construct an empty index.
    pub fn new() -> Self {
        Self {
            store: HashIndex::new(BitHasher::default()),
        }
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Insert a point. Duplicates are detected only for bit-identical keys.
    pub fn insert(&mut self, point: &Point<D, E>) -> bool {
        self.store.insert(point)
    }

    /// Remove a point. Returns `true` if it was present.
    pub fn remove(&mut self, point: &Point<D, E>) -> bool {
        self.store.remove(point)
    }

    /// Return `true` if the point is stored in the index.
    pub fn query(&self, point: &Point<D, E>) -> bool {
        self.store.query(point)
    }

    /// Total number of points currently stored.
    pub fn num_points_stored(&self) -> usize {
        self.store.num_points_stored()
    }

    /// Number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.store.num_buckets()
    }
}

impl<const D: usize, E: Element> PointIndex<D, E> for BitHash<D, E> {
    fn insert(&mut self, point: &Point<D, E>) -> bool {
        BitHash::insert(self, point)
    }

    fn remove(&mut self, point: &Point<D, E>) -> bool {
        BitHash::remove(self, point)
    }

    fn query(&self, point: &Point<D, E>) -> bool {
        BitHash::query(self, point)
    }
}
