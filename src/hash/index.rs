use ahash::AHashMap;

use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::{Element, HashKey};

/// Maps a point to the one-dimensional key of the bucket it belongs to.
pub trait PointHasher<const D: usize, E: Element> {
    fn hash_point(&self, point: &Point<D, E>) -> HashKey;
}

/// All points sharing one hash key, in insertion order.
///
/// The parallel `sums` vector caches each point's coordinate sum; a scan
/// compares the sum first and only falls back to the full coordinate
/// comparison on a match.
#[derive(Debug, Clone, Default)]
pub(crate) struct Bucket<const D: usize, E: Element> {
    pub(crate) points: Vec<Point<D, E>>,
    pub(crate) sums: Vec<E>,
}

impl<const D: usize, E: Element> Bucket<D, E> {
    fn position_of(&self, point: &Point<D, E>) -> Option<usize> {
        let sum = point.sum();
        self.points
            .iter()
            .zip(&self.sums)
            .position(|(stored, &stored_sum)| stored_sum == sum && stored.approx_eq(point))
    }

    fn push(&mut self, point: Point<D, E>) {
        self.sums.push(point.sum());
        self.points.push(point);
    }

    /// Swap-remove from both parallel vectors; bucket order is not preserved.
    fn swap_remove(&mut self, index: usize) {
        self.points.swap_remove(index);
        self.sums.swap_remove(index);
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }
}

/// A generic hash-based index structure, parameterised by the hasher that
/// projects points down to one dimension.
#[derive(Debug, Clone)]
pub struct HashIndex<const D: usize, E: Element, H> {
    hasher: H,
    pub(crate) buckets: AHashMap<HashKey, Bucket<D, E>>,
}

impl<const D: usize, E: Element, H: PointHasher<D, E>> HashIndex<D, E, H> {
    /// Construct an empty index around the given hasher.
    pub fn new(hasher: H) -> Self {
        Self {
            hasher,
            buckets: AHashMap::new(),
        }
    }

    /// Remove all points, deallocating the buckets.
    pub fn clear(&mut self) {
        self.buckets = AHashMap::new();
    }

    pub(crate) fn hasher_mut(&mut self) -> &mut H {
        &mut self.hasher
    }

    /// Insert a point, rejecting tolerant duplicates within its bucket.
    pub fn insert(&mut self, point: &Point<D, E>) -> bool {
        let key = self.hasher.hash_point(point);
        let bucket = self.buckets.entry(key).or_default();
        if bucket.position_of(point).is_some() {
            return false;
        }
        bucket.push(*point);
        true
    }

    /// Remove a point. Returns `true` if it was present.
    pub fn remove(&mut self, point: &Point<D, E>) -> bool {
        let key = self.hasher.hash_point(point);
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let Some(index) = bucket.position_of(point) else {
            return false;
        };
        bucket.swap_remove(index);
        true
    }

    /// Return `true` if the point is stored in the index.
    pub fn query(&self, point: &Point<D, E>) -> bool {
        let key = self.hasher.hash_point(point);
        self.buckets
            .get(&key)
            .is_some_and(|bucket| bucket.position_of(point).is_some())
    }

    /// Total number of points currently stored.
    pub fn num_points_stored(&self) -> usize {
        self.buckets.values().map(Bucket::len).sum()
    }

    /// Number of buckets, including any emptied by removals.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Mean number of points per bucket; 0 when there are no buckets.
    pub fn average_points_per_bucket(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.num_points_stored() as f64 / self.num_buckets() as f64
    }

    /// Smallest bucket size; 0 when there are no buckets.
    pub fn min_points_per_bucket(&self) -> usize {
        self.buckets.values().map(Bucket::len).min().unwrap_or(0)
    }

    /// Largest bucket size; 0 when there are no buckets.
    pub fn max_points_per_bucket(&self) -> usize {
        self.buckets.values().map(Bucket::len).max().unwrap_or(0)
    }
}

impl<const D: usize, E: Element, H: PointHasher<D, E>> PointIndex<D, E> for HashIndex<D, E, H> {
    fn insert(&mut self, point: &Point<D, E>) -> bool {
        HashIndex::insert(self, point)
    }

    fn remove(&mut self, point: &Point<D, E>) -> bool {
        HashIndex::remove(self, point)
    }

    fn query(&self, point: &Point<D, E>) -> bool {
        HashIndex::query(self, point)
    }
}
