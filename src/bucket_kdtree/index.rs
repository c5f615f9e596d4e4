use slab::Slab;
use smallvec::SmallVec;

use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::Element;

/// Maximum number of points allowed in a leaf bucket.
pub const MAX_POINTS_PER_BUCKET: usize = 8;
/// An internal node whose subtree holds fewer points than this merges its
/// children back into a single leaf.
pub const MIN_POINTS_BEFORE_MERGE: usize = MAX_POINTS_PER_BUCKET / 2;

type PointList<const D: usize, E> = SmallVec<[Point<D, E>; MAX_POINTS_PER_BUCKET]>;

#[derive(Debug, Clone)]
pub(crate) enum NodeKind<const D: usize, E: Element> {
    Leaf {
        points: PointList<D, E>,
    },
    Split {
        dim: usize,
        value: E,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct Node<const D: usize, E: Element> {
    pub(crate) parent: Option<usize>,
    pub(crate) total_points: usize,
    pub(crate) kind: NodeKind<D, E>,
}

impl<const D: usize, E: Element> Node<D, E> {
    fn leaf(parent: Option<usize>) -> Self {
        Self {
            parent,
            total_points: 0,
            kind: NodeKind::Leaf {
                points: PointList::new(),
            },
        }
    }

    fn leaf_with_points(parent: Option<usize>, points: PointList<D, E>) -> Self {
        Self {
            parent,
            total_points: points.len(),
            kind: NodeKind::Leaf { points },
        }
    }

    fn points(&self) -> &PointList<D, E> {
        match &self.kind {
            NodeKind::Leaf { points } => points,
            NodeKind::Split { .. } => unreachable!("split node has no point list"),
        }
    }

    fn points_mut(&mut self) -> &mut PointList<D, E> {
        match &mut self.kind {
            NodeKind::Leaf { points } => points,
            NodeKind::Split { .. } => unreachable!("split node has no point list"),
        }
    }

    fn into_points(self) -> PointList<D, E> {
        match self.kind {
            NodeKind::Leaf { points } => points,
            NodeKind::Split { .. } => unreachable!("split node has no point list"),
        }
    }

    fn contains(&self, point: &Point<D, E>) -> bool {
        self.points().iter().any(|stored| stored.approx_eq(point))
    }
}

/// Bucket k-d tree. Points are stored only in leaf buckets; internal nodes
/// carry the cutting plane and the size of their subtree.
#[derive(Debug, Clone)]
pub struct BucketKdTree<const D: usize, E: Element> {
    pub(crate) nodes: Slab<Node<D, E>>,
    pub(crate) root: usize,
}

impl<const D: usize, E: Element> BucketKdTree<D, E> {
    /// Construct an empty tree: a single empty leaf bucket.
    pub fn new() -> Self {
        let mut nodes = Slab::new();
        let root = nodes.insert(Node::leaf(None));
        Self { nodes, root }
    }

    /// Remove all points from the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(Node::leaf(None));
    }

    /// Total number of points stored.
    pub fn total_points(&self) -> usize {
        self.nodes[self.root].total_points
    }

    pub fn is_empty(&self) -> bool {
        self.total_points() == 0
    }

    /// Insert a point, rejecting tolerant duplicates.
    pub fn insert(&mut self, point: &Point<D, E>) -> bool {
        let leaf = self.find_leaf(point);
        self.add_to_leaf(leaf, point)
    }

    /// Return `true` if the point is stored in the tree.
    pub fn query(&self, point: &Point<D, E>) -> bool {
        let leaf = self.find_leaf(point);
        self.nodes[leaf].contains(point)
    }

    /// Remove a point. Returns `true` if it was present.
    pub fn remove(&mut self, point: &Point<D, E>) -> bool {
        let leaf = self.find_leaf(point);
        let position = match self.nodes[leaf]
            .points()
            .iter()
            .position(|stored| stored.approx_eq(point))
        {
            Some(position) => position,
            None => return false,
        };
        self.nodes[leaf].points_mut().remove(position);
        self.decrement_total_points(leaf);

        // The shrunken sibling pair may now fit in a single bucket again.
        if let Some(parent) = self.nodes[leaf].parent {
            self.attempt_merge(parent);
        }
        true
    }

    /// Leaf bucket covering the region that contains `point`.
    fn find_leaf(&self, point: &Point<D, E>) -> usize {
        let mut current = self.root;
        loop {
            match self.nodes[current].kind {
                NodeKind::Leaf { .. } => return current,
                NodeKind::Split {
                    dim,
                    value,
                    left,
                    right,
                } => {
                    current = if point[dim] < value { left } else { right };
                }
            }
        }
    }

    fn add_to_leaf(&mut self, leaf: usize, point: &Point<D, E>) -> bool {
        if self.nodes[leaf].contains(point) {
            return false;
        }
        if self.nodes[leaf].points().len() < MAX_POINTS_PER_BUCKET {
            self.nodes[leaf].points_mut().push(*point);
            self.increment_total_points(leaf);
        } else {
            self.split_and_insert(leaf, point);
        }
        true
    }

    /// Split a full leaf into two children and route `point` into one of
    /// them, which may split again in turn.
    fn split_and_insert(&mut self, leaf: usize, point: &Point<D, E>) {
        let points = std::mem::take(self.nodes[leaf].points_mut());
        let dim = widest_dimension(&points);
        let value = dimension_mean(dim, &points);

        let (left_points, right_points): (PointList<D, E>, PointList<D, E>) =
            points.into_iter().partition(|p| p[dim] < value);

        let left = self
            .nodes
            .insert(Node::leaf_with_points(Some(leaf), left_points));
        let right = self
            .nodes
            .insert(Node::leaf_with_points(Some(leaf), right_points));
        self.nodes[leaf].kind = NodeKind::Split {
            dim,
            value,
            left,
            right,
        };

        let target = if point[dim] < value { left } else { right };
        self.add_to_leaf(target, point);
    }

    /// Collapse an internal node back into a leaf once its subtree has
    /// shrunk below the merge threshold, then ask its parent to do the same.
    fn attempt_merge(&mut self, node: usize) {
        if self.nodes[node].total_points >= MIN_POINTS_BEFORE_MERGE {
            return;
        }
        let (left, right) = match self.nodes[node].kind {
            NodeKind::Split { left, right, .. } => (left, right),
            NodeKind::Leaf { .. } => unreachable!("merge attempted on a leaf"),
        };
        // Below the threshold both children must be leaves: every split
        // leaves at least one point per side and merges propagate upward.
        let mut merged = self.nodes.remove(left).into_points();
        merged.extend(self.nodes.remove(right).into_points());
        self.nodes[node].kind = NodeKind::Leaf { points: merged };

        if let Some(parent) = self.nodes[node].parent {
            self.attempt_merge(parent);
        }
    }

    fn increment_total_points(&mut self, start: usize) {
        let mut current = Some(start);
        while let Some(node) = current {
            self.nodes[node].total_points += 1;
            current = self.nodes[node].parent;
        }
    }

    fn decrement_total_points(&mut self, start: usize) {
        let mut current = Some(start);
        while let Some(node) = current {
            self.nodes[node].total_points -= 1;
            current = self.nodes[node].parent;
        }
    }
}

impl<const D: usize, E: Element> Default for BucketKdTree<D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, E: Element> PointIndex<D, E> for BucketKdTree<D, E> {
    fn insert(&mut self, point: &Point<D, E>) -> bool {
        BucketKdTree::insert(self, point)
    }

    fn remove(&mut self, point: &Point<D, E>) -> bool {
        BucketKdTree::remove(self, point)
    }

    fn query(&self, point: &Point<D, E>) -> bool {
        BucketKdTree::query(self, point)
    }
}

/// Dimension with the highest coordinate range; ties keep the lowest index.
fn widest_dimension<const D: usize, E: Element>(points: &[Point<D, E>]) -> usize {
    let mut chosen = 0;
    let mut max_range = dimension_range(0, points);
    for d in 1..D {
        let range = dimension_range(d, points);
        if range > max_range {
            chosen = d;
            max_range = range;
        }
    }
    chosen
}

fn dimension_range<const D: usize, E: Element>(d: usize, points: &[Point<D, E>]) -> E {
    let Some(first) = points.first() else {
        return E::zero();
    };
    let mut min = first[d];
    let mut max = first[d];
    for point in points {
        let value = point[d];
        if value < min {
            min = value;
        } else if value > max {
            max = value;
        }
    }
    max - min
}

fn dimension_mean<const D: usize, E: Element>(d: usize, points: &[Point<D, E>]) -> E {
    let sum = points.iter().fold(E::zero(), |acc, point| acc + point[d]);
    sum / E::cast(points.len())
}
