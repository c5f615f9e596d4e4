use crate::bucket_kdtree::index::{Node, NodeKind};
use crate::bucket_kdtree::{BucketKdTree, MAX_POINTS_PER_BUCKET, MIN_POINTS_BEFORE_MERGE};
use crate::point::Point;

fn p3(x: f32, y: f32, z: f32) -> Point<3, f32> {
    Point::new([x, y, z])
}

/// Walk the tree checking every structural invariant; returns the subtree
/// point count so parents can validate their totals.
fn check_subtree(tree: &BucketKdTree<3, f32>, node: usize, parent: Option<usize>) -> usize {
    let stored: &Node<3, f32> = &tree.nodes[node];
    assert_eq!(stored.parent, parent);
    match &stored.kind {
        NodeKind::Leaf { points } => {
            assert!(points.len() <= MAX_POINTS_PER_BUCKET);
            assert_eq!(stored.total_points, points.len());
            points.len()
        }
        NodeKind::Split { left, right, .. } => {
            assert!(
                stored.total_points >= MIN_POINTS_BEFORE_MERGE,
                "internal node below merge threshold"
            );
            let count =
                check_subtree(tree, *left, Some(node)) + check_subtree(tree, *right, Some(node));
            assert_eq!(stored.total_points, count);
            count
        }
    }
}

fn check_invariants(tree: &BucketKdTree<3, f32>) {
    let total = check_subtree(tree, tree.root, None);
    assert_eq!(total, tree.total_points());
}

#[test]
fn ninth_point_splits_on_widest_dimension() {
    let mut tree = BucketKdTree::<3, f32>::new();
    let xs = [0.1, 0.2, 0.3, 0.4, 0.6, 0.7, 0.8, 0.9, 0.5];
    for x in xs {
        assert!(tree.insert(&p3(x, 0.0, 0.0)));
    }
    assert_eq!(tree.total_points(), 9);
    for x in xs {
        assert!(tree.query(&p3(x, 0.0, 0.0)));
    }
    check_invariants(&tree);

    // The eight resident points had mean 0.5 along dimension 0, so the split
    // partitions them 4/4 and the ninth lands on whichever side the
    // `<` predicate puts 0.5.
    match tree.nodes[tree.root].kind {
        NodeKind::Split {
            dim, left, right, ..
        } => {
            assert_eq!(dim, 0);
            let left_count = tree.nodes[left].total_points;
            let right_count = tree.nodes[right].total_points;
            assert_eq!(left_count + right_count, 9);
            assert!(left_count == 4 || left_count == 5);
            assert!(matches!(tree.nodes[left].kind, NodeKind::Leaf { .. }));
            assert!(matches!(tree.nodes[right].kind, NodeKind::Leaf { .. }));
        }
        NodeKind::Leaf { .. } => panic!("root did not split"),
    }
}

#[test]
fn removals_merge_children_back_into_leaf() {
    let mut tree = BucketKdTree::<3, f32>::new();
    let xs = [0.1, 0.2, 0.3, 0.4, 0.6, 0.7, 0.8, 0.9, 0.5];
    for x in xs {
        assert!(tree.insert(&p3(x, 0.0, 0.0)));
    }
    assert!(matches!(
        tree.nodes[tree.root].kind,
        NodeKind::Split { .. }
    ));

    // Dropping to three points forces the split root to fold back up.
    for x in [0.1, 0.2, 0.3, 0.4, 0.6, 0.7] {
        assert!(tree.remove(&p3(x, 0.0, 0.0)));
        check_invariants(&tree);
    }
    assert_eq!(tree.total_points(), 3);
    assert!(matches!(tree.nodes[tree.root].kind, NodeKind::Leaf { .. }));
    assert_eq!(tree.nodes.len(), 1);

    for x in [0.8, 0.9, 0.5] {
        assert!(tree.query(&p3(x, 0.0, 0.0)));
        assert!(tree.remove(&p3(x, 0.0, 0.0)));
    }
    assert!(tree.is_empty());
}

#[test]
fn duplicate_inserts_are_rejected() {
    let mut tree = BucketKdTree::<3, f32>::new();
    assert!(tree.insert(&p3(0.3, 0.3, 0.3)));
    assert!(!tree.insert(&p3(0.3, 0.3, 0.3)));
    assert!(!tree.insert(&p3(0.3 + 4.0e-8, 0.3, 0.3 - 4.0e-8)));
    assert_eq!(tree.total_points(), 1);
}

#[test]
fn remove_of_absent_point_fails() {
    let mut tree = BucketKdTree::<3, f32>::new();
    assert!(!tree.remove(&p3(0.5, 0.5, 0.5)));
    assert!(tree.insert(&p3(0.5, 0.5, 0.5)));
    assert!(!tree.remove(&p3(0.5, 0.6, 0.5)));
    assert!(tree.remove(&p3(0.5, 0.5, 0.5)));
    assert!(!tree.remove(&p3(0.5, 0.5, 0.5)));
}

#[test]
fn deep_split_keeps_invariants() {
    let mut tree = BucketKdTree::<3, f32>::new();
    // A grid of points spread over two dimensions, enough to split leaves
    // several levels deep.
    let mut inserted = Vec::new();
    for i in 0..8 {
        for j in 0..8 {
            let point = p3(i as f32 * 0.125, j as f32 * 0.125, 0.25);
            assert!(tree.insert(&point));
            inserted.push(point);
        }
    }
    assert_eq!(tree.total_points(), 64);
    check_invariants(&tree);

    for point in &inserted {
        assert!(tree.query(point));
    }
    // Remove every other point, then the rest.
    for point in inserted.iter().step_by(2) {
        assert!(tree.remove(point));
    }
    check_invariants(&tree);
    for point in inserted.iter().skip(1).step_by(2) {
        assert!(tree.remove(point));
        check_invariants(&tree);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.nodes.len(), 1);
}

#[test]
fn clear_resets_to_a_single_bucket() {
    let mut tree = BucketKdTree::<3, f32>::new();
    for i in 0..20 {
        assert!(tree.insert(&p3(i as f32 * 0.05, 0.0, 0.0)));
    }
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.nodes.len(), 1);
    assert!(tree.insert(&p3(0.0, 0.0, 0.0)));
}
