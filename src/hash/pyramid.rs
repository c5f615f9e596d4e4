use std::cmp::Ordering;

use crate::boundary::Boundary;
use crate::hash::index::{HashIndex, PointHasher};
use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::{Element, HashKey};

/// Total number of distinguishable buckets across all pyramids.
const MAX_BUCKET_NUMBER: f64 = 3.0e10;

/// Projects a point to its scalar pyramid value.
///
/// The data space is split into `2D` pyramids meeting at the centre of the
/// boundary; a point belongs to the pyramid of the dimension in which it
/// deviates the most from the centre, and its height within that pyramid
/// refines the value.
#[derive(Debug, Clone)]
pub struct PyramidHasher<const D: usize, E: Element> {
    boundary: Boundary<D, E>,
    bucket_interval: E,
}

impl<const D: usize, E: Element> PyramidHasher<D, E> {
    pub fn new(boundary: Boundary<D, E>) -> Self {
        let bucket_interval = (E::cast(MAX_BUCKET_NUMBER) / E::cast(2 * D)).floor();
        Self {
            boundary,
            bucket_interval,
        }
    }
}

/// Normalise `coord` into the 0-1 range of its dimension.
#[inline]
fn normalise<E: Element>(coord: E, min: E, max: E) -> E {
    (coord - min) / (max - min)
}

/// Distance of a coordinate from the centre of its normalised dimension.
#[inline]
fn pyramid_height<E: Element>(coord: E, min: E, max: E) -> E {
    (E::half() - normalise(coord, min, max)).abs()
}

impl<const D: usize, E: Element> PointHasher<D, E> for PyramidHasher<D, E> {
    fn hash_point(&self, point: &Point<D, E>) -> HashKey {
        let mut d_max = 0;
        let mut max_height = pyramid_height(point[0], self.boundary[0].min, self.boundary[0].max);
        for d in 1..D {
            let height = pyramid_height(point[d], self.boundary[d].min, self.boundary[d].max);
            // A coordinate sitting on the min or max of its dimension has
            // height 0.5 and would always win; skip it so boundary values
            // do not decide the pyramid.
            if height.approx_cmp(E::half()) == Ordering::Equal {
                continue;
            }
            if max_height < height {
                d_max = d;
                max_height = height;
            }
        }

        let index = if normalise(
            point[d_max],
            self.boundary[d_max].min,
            self.boundary[d_max].max,
        ) < E::half()
        {
            d_max // pyramid below the central point
        } else {
            d_max + D // pyramid above the central point
        };

        ((E::cast(index) + max_height) * self.bucket_interval).to_hash_key()
    }
}

/// Pyramid Tree: points are hashed to discretised pyramid values and stored
/// in the bucket keyed by that value.
#[derive(Debug, Clone)]
pub struct PyramidTree<const D: usize, E: Element> {
    store: HashIndex<D, E, PyramidHasher<D, E>>,
}

impl<const D: usize, E: Element> PyramidTree<D, E> {
    /// Construct an empty tree covering the given boundary.
    pub fn new(boundary: Boundary<D, E>) -> Self {
        Self {
            store: HashIndex::new(PyramidHasher::new(boundary)),
        }
    }

    /// Remove all points and adopt a new boundary.
    pub fn clear(&mut self, boundary: Boundary<D, E>) {
        self.store.clear();
        *self.store.hasher_mut() = PyramidHasher::new(boundary);
    }

    /// Insert a point, rejecting tolerant duplicates within its bucket.
    pub fn insert(&mut self, point: &Point<D, E>) -> bool {
        self.store.insert(point)
    }

    /// Remove a point. Returns `true` if it was present.
    pub fn remove(&mut self, point: &Point<D, E>) -> bool {
        self.store.remove(point)
    }

    /// Return `true` if the point is stored in the tree.
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

    /// Mean number of points per bucket.
    pub fn average_points_per_bucket(&self) -> f64 {
        self.store.average_points_per_bucket()
    }
}

impl<const D: usize, E: Element> PointIndex<D, E> for PyramidTree<D, E> {
    fn insert(&mut self, point: &Point<D, E>) -> bool {
        PyramidTree::insert(self, point)
    }

    fn remove(&mut self, point: &Point<D, E>) -> bool {
        PyramidTree::remove(self, point)
    }

    fn query(&self, point: &Point<D, E>) -> bool {
        PyramidTree::query(self, point)
    }
}
