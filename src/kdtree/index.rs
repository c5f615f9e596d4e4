use std::cmp::Ordering;

use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::Element;

#[derive(Debug, Clone)]
struct Node<const D: usize, E: Element> {
    point: Point<D, E>,
    left: Option<Box<Node<D, E>>>,
    right: Option<Box<Node<D, E>>>,
}

impl<const D: usize, E: Element> Node<D, E> {
    fn new(point: Point<D, E>) -> Self {
        Self {
            point,
            left: None,
            right: None,
        }
    }
}

/// Point k-d tree: one point per node, cutting dimension `depth mod D`.
#[derive(Debug, Clone, Default)]
pub struct KdTree<const D: usize, E: Element> {
    root: Option<Box<Node<D, E>>>,
    len: usize,
}

impl<const D: usize, E: Element> KdTree<D, E> {
    /// Construct an empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
        }
    }

    /// Remove all points from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a point, rejecting tolerant duplicates.
    pub fn insert(&mut self, point: &Point<D, E>) -> bool {
        let mut cutting_dim = 0;
        let mut current = &mut self.root;
        while let Some(node) = current {
            if point.approx_eq(&node.point) {
                return false;
            } else if point[cutting_dim] < node.point[cutting_dim] {
                current = &mut node.left;
            } else {
                current = &mut node.right;
            }
            cutting_dim = (cutting_dim + 1) % D;
        }
        *current = Some(Box::new(Node::new(*point)));
        self.len += 1;
        true
    }

    /// Return `true` if the point is stored in the tree.
    pub fn query(&self, point: &Point<D, E>) -> bool {
        let mut cutting_dim = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if point.approx_eq(&node.point) {
                return true;
            } else if point[cutting_dim] < node.point[cutting_dim] {
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
            cutting_dim = (cutting_dim + 1) % D;
        }
        false
    }

    /// Remove a point. Returns `true` if it was present.
    pub fn remove(&mut self, point: &Point<D, E>) -> bool {
        let mut removed = false;
        self.root = Self::remove_node(self.root.take(), point, 0, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_node(
        node: Option<Box<Node<D, E>>>,
        point: &Point<D, E>,
        cutting_dim: usize,
        removed: &mut bool,
    ) -> Option<Box<Node<D, E>>> {
        let mut node = node?;
        let next_dim = (cutting_dim + 1) % D;
        match point[cutting_dim].approx_cmp(node.point[cutting_dim]) {
            Ordering::Less => {
                node.left = Self::remove_node(node.left.take(), point, next_dim, removed);
            }
            Ordering::Greater => {
                node.right = Self::remove_node(node.right.take(), point, next_dim, removed);
            }
            // A matching cutting coordinate alone is not enough: a point
            // whose other coordinates differ lives in the right subtree.
            Ordering::Equal if !point.approx_eq(&node.point) => {
                node.right = Self::remove_node(node.right.take(), point, next_dim, removed);
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => {
                    *removed = true;
                    return None;
                }
                (left, Some(right)) => {
                    // Replace with the cutting-dimension minimum of the right
                    // subtree, then delete that point from it.
                    let min = Self::subtree_min(&right, cutting_dim, next_dim);
                    node.point = min;
                    node.left = left;
                    node.right = Self::remove_node(Some(right), &min, next_dim, removed);
                }
                (Some(left), None) => {
                    let min = Self::subtree_min(&left, cutting_dim, next_dim);
                    node.point = min;
                    // The remaining subtree moves to the right slot so that
                    // cutting-value ties keep descending right.
                    node.right = Self::remove_node(Some(left), &min, next_dim, removed);
                }
            },
        }
        Some(node)
    }

    /// Point with the lowest value along `dim` in the subtree rooted at `node`.
    fn subtree_min(node: &Node<D, E>, dim: usize, cutting_dim: usize) -> Point<D, E> {
        let next_dim = (cutting_dim + 1) % D;
        if dim == cutting_dim {
            // The minimum can only lie leftward of the cutting plane.
            match &node.left {
                Some(left) => Self::subtree_min(left, dim, next_dim),
                None => node.point,
            }
        } else {
            let mut min = node.point;
            if let Some(left) = &node.left {
                let candidate = Self::subtree_min(left, dim, next_dim);
                if candidate[dim] < min[dim] {
                    min = candidate;
                }
            }
            if let Some(right) = &node.right {
                let candidate = Self::subtree_min(right, dim, next_dim);
                if candidate[dim] < min[dim] {
                    min = candidate;
                }
            }
            min
        }
    }
}

impl<const D: usize, E: Element> PointIndex<D, E> for KdTree<D, E> {
    fn insert(&mut self, point: &Point<D, E>) -> bool {
        KdTree::insert(self, point)
    }

    fn remove(&mut self, point: &Point<D, E>) -> bool {
        KdTree::remove(self, point)
    }

    fn query(&self, point: &Point<D, E>) -> bool {
        KdTree::query(self, point)
    }
}
