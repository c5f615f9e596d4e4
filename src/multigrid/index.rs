use std::collections::hash_map::Entry;
use std::mem;

use ahash::AHashMap;
use smallvec::{smallvec, SmallVec};

use crate::boundary::Boundary;
use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::{Element, HashKey};

/// Default number of equal-width cells each dimension is divided into.
pub const DEFAULT_INTERVALS_PER_DIMENSION: f64 = 1.0e9;
/// Default cell capacity before subdivision.
pub const DEFAULT_BUCKET_SIZE: usize = 8;

type NodeMap = AHashMap<HashKey, Node>;

#[derive(Debug, Clone)]
pub(crate) enum Node {
    /// Indices into the tree's point arena.
    Leaf(SmallVec<[usize; DEFAULT_BUCKET_SIZE]>),
    Internal(Box<NodeMap>),
}

/// Backing storage for every point the tree holds. Removals tombstone their
/// slot onto the free list; later insertions reuse it.
#[derive(Debug, Clone, Default)]
pub(crate) struct PointArena<const D: usize, E: Element> {
    pub(crate) slots: Vec<Point<D, E>>,
    pub(crate) free: Vec<usize>,
}

impl<const D: usize, E: Element> PointArena<D, E> {
    fn alloc(&mut self, point: Point<D, E>) -> usize {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = point;
                index
            }
            None => {
                self.slots.push(point);
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) {
        self.free.push(index);
    }

    fn live_len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

/// Cell geometry: which grid cell a coordinate falls into.
#[derive(Debug, Clone, Copy)]
struct GridShape<const D: usize, E: Element> {
    boundary: Boundary<D, E>,
    intervals_per_dimension: E,
}

impl<const D: usize, E: Element> GridShape<D, E> {
    fn cell_key(&self, point: &Point<D, E>, d: usize) -> HashKey {
        let interval = self.boundary[d];
        let normalised = (point[d] - interval.min) / (interval.max - interval.min);
        (normalised * self.intervals_per_dimension).to_hash_key()
    }
}

/// Multigrid tree over a fixed boundary.
#[derive(Debug, Clone)]
pub struct Multigrid<const D: usize, E: Element> {
    shape: GridShape<D, E>,
    bucket_size: usize,
    pub(crate) roots: NodeMap,
    pub(crate) arena: PointArena<D, E>,
}

impl<const D: usize, E: Element> Multigrid<D, E> {
    /// Construct an empty tree covering the given boundary, with the default
    /// interval count and bucket size.
    pub fn new(boundary: Boundary<D, E>) -> Self {
        Self::with_config(
            boundary,
            E::cast(DEFAULT_INTERVALS_PER_DIMENSION),
            DEFAULT_BUCKET_SIZE,
        )
    }

    /// Construct an empty tree with an explicit per-dimension interval count
    /// and cell capacity.
    pub fn with_config(boundary: Boundary<D, E>, intervals_per_dimension: E, bucket_size: usize) -> Self {
        Self {
            shape: GridShape {
                boundary,
                intervals_per_dimension,
            },
            bucket_size,
            roots: NodeMap::new(),
            arena: PointArena::default(),
        }
    }

    /// Remove all points and adopt a new boundary.
    pub fn clear(&mut self, boundary: Boundary<D, E>) {
        self.shape.boundary = boundary;
        self.roots = NodeMap::new();
        self.arena.clear();
    }

    /// Insert a point, rejecting tolerant duplicates within its cell.
    pub fn insert(&mut self, point: &Point<D, E>) -> bool {
        let key = self.shape.cell_key(point, 0);
        match self.roots.entry(key) {
            Entry::Vacant(slot) => {
                let index = self.arena.alloc(*point);
                slot.insert(Node::Leaf(smallvec![index]));
                true
            }
            Entry::Occupied(slot) => insert_into_node(
                &mut self.arena,
                &self.shape,
                self.bucket_size,
                slot.into_mut(),
                point,
                1,
            ),
        }
    }

    /// Return `true` if the point is stored in the tree.
    pub fn query(&self, point: &Point<D, E>) -> bool {
        let mut node = self.roots.get(&self.shape.cell_key(point, 0));
        let mut current_dim = 1;
        while let Some(current) = node {
            match current {
                Node::Leaf(indices) => {
                    return indices
                        .iter()
                        .any(|&index| self.arena.slots[index].approx_eq(point));
                }
                Node::Internal(children) => {
                    node = children.get(&self.shape.cell_key(point, current_dim));
                    current_dim += 1;
                }
            }
        }
        false
    }

    /// Remove a point. Returns `true` if it was present. The arena slot is
    /// tombstoned, not reclaimed.
    pub fn remove(&mut self, point: &Point<D, E>) -> bool {
        let mut node = self.roots.get_mut(&self.shape.cell_key(point, 0));
        let mut current_dim = 1;
        while let Some(current) = node {
            match current {
                Node::Leaf(indices) => {
                    let position = match indices
                        .iter()
                        .position(|&index| self.arena.slots[index].approx_eq(point))
                    {
                        Some(position) => position,
                        None => return false,
                    };
                    let index = indices.swap_remove(position);
                    self.arena.release(index);
                    return true;
                }
                Node::Internal(children) => {
                    node = children.get_mut(&self.shape.cell_key(point, current_dim));
                    current_dim += 1;
                }
            }
        }
        false
    }

    /// Number of live points (tombstoned arena slots are not counted).
    pub fn num_points(&self) -> usize {
        self.arena.live_len()
    }

    /// Number of leaf buckets in the tree.
    pub fn num_buckets(&self) -> usize {
        count_leaves(&self.roots)
    }

    /// Mean number of points per leaf bucket; 0 when there are no buckets.
    pub fn average_bucket_size(&self) -> f64 {
        let buckets = self.num_buckets();
        if buckets == 0 {
            return 0.0;
        }
        self.num_points() as f64 / buckets as f64
    }

    /// Number of arena indices reachable from the tree. Always equals
    /// [`num_points`][Multigrid::num_points].
    #[cfg(test)]
    pub(crate) fn reachable_indices(&self) -> usize {
        fn count(map: &NodeMap) -> usize {
            map.values()
                .map(|node| match node {
                    Node::Leaf(indices) => indices.len(),
                    Node::Internal(children) => count(children),
                })
                .sum()
        }
        count(&self.roots)
    }
}

fn insert_into_node<const D: usize, E: Element>(
    arena: &mut PointArena<D, E>,
    shape: &GridShape<D, E>,
    bucket_size: usize,
    node: &mut Node,
    point: &Point<D, E>,
    current_dim: usize,
) -> bool {
    match node {
        Node::Leaf(indices) => {
            if indices
                .iter()
                .any(|&index| arena.slots[index].approx_eq(point))
            {
                return false;
            }
            if indices.len() < bucket_size || current_dim >= D {
                // Past the last dimension there is nothing left to hash on;
                // the leaf grows without bound.
                let index = arena.alloc(*point);
                indices.push(index);
                true
            } else {
                // Subdivide: redistribute the held indices into children by
                // the next dimension, then insert the new point normally.
                let held = mem::take(indices);
                let mut children = Box::<NodeMap>::default();
                for index in held {
                    distribute_index(&mut children, arena, shape, index, current_dim);
                }
                *node = Node::Internal(children);
                insert_into_node(arena, shape, bucket_size, node, point, current_dim)
            }
        }
        Node::Internal(children) => {
            let key = shape.cell_key(point, current_dim);
            match children.entry(key) {
                Entry::Vacant(slot) => {
                    let index = arena.alloc(*point);
                    slot.insert(Node::Leaf(smallvec![index]));
                    true
                }
                Entry::Occupied(slot) => insert_into_node(
                    arena,
                    shape,
                    bucket_size,
                    slot.into_mut(),
                    point,
                    current_dim + 1,
                ),
            }
        }
    }
}

/// Place an existing arena index under the child covering its point. Used
/// during subdivision, so the index keeps its slot.
fn distribute_index<const D: usize, E: Element>(
    children: &mut NodeMap,
    arena: &PointArena<D, E>,
    shape: &GridShape<D, E>,
    index: usize,
    current_dim: usize,
) {
    let key = shape.cell_key(&arena.slots[index], current_dim);
    match children.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(Node::Leaf(smallvec![index]));
        }
        Entry::Occupied(slot) => match slot.into_mut() {
            Node::Leaf(indices) => indices.push(index),
            Node::Internal(grandchildren) => {
                distribute_index(grandchildren, arena, shape, index, current_dim + 1)
            }
        },
    }
}

fn count_leaves(map: &NodeMap) -> usize {
    map.values()
        .map(|node| match node {
            Node::Leaf(_) => 1,
            Node::Internal(children) => count_leaves(children),
        })
        .sum()
}

impl<const D: usize, E: Element> PointIndex<D, E> for Multigrid<D, E> {
    fn insert(&mut self, point: &Point<D, E>) -> bool {
        Multigrid::insert(self, point)
    }

    fn remove(&mut self, point: &Point<D, E>) -> bool {
        Multigrid::remove(self, point)
    }

    fn query(&self, point: &Point<D, E>) -> bool {
        Multigrid::query(self, point)
    }
}
