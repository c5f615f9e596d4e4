use crate::boundary::{Boundary, Interval};
use crate::multigrid::Multigrid;
use crate::point::Point;

fn p2(x: f32, y: f32) -> Point<2, f32> {
    Point::new([x, y])
}

fn p3(x: f32, y: f32, z: f32) -> Point<3, f32> {
    Point::new([x, y, z])
}

#[test]
fn overflowing_cell_subdivides_on_next_dimension() {
    let mut grid = Multigrid::<2, f32>::with_config(Boundary::unit(), 2.0, 2);
    // Three points share the dimension-0 cell; the third overflows the
    // bucket and forces a subdivision by dimension 1. A fourth point lands
    // in its own dimension-0 cell.
    assert!(grid.insert(&p2(0.1, 0.1)));
    assert!(grid.insert(&p2(0.1, 0.9)));
    assert!(grid.insert(&p2(0.1, 0.6)));
    assert!(grid.insert(&p2(0.9, 0.5)));

    assert_eq!(grid.num_points(), 4);
    assert_eq!(grid.num_buckets(), 3);
    assert_eq!(grid.reachable_indices(), grid.num_points());

    for point in [p2(0.1, 0.1), p2(0.1, 0.9), p2(0.1, 0.6), p2(0.9, 0.5)] {
        assert!(grid.query(&point));
    }
    assert!(!grid.query(&p2(0.5, 0.5)));
}

#[test]
fn leaf_grows_when_no_dimensions_remain() {
    let mut grid = Multigrid::<2, f32>::with_config(Boundary::unit(), 1.0, 2);
    // One interval per dimension puts every point in the same cell at every
    // depth; once both dimensions are spent, the leaf must keep accepting.
    let points = [
        p2(0.1, 0.1),
        p2(0.2, 0.2),
        p2(0.3, 0.3),
        p2(0.4, 0.4),
        p2(0.5, 0.5),
    ];
    for point in &points {
        assert!(grid.insert(point));
    }
    assert_eq!(grid.num_points(), 5);
    assert_eq!(grid.num_buckets(), 1);
    for point in &points {
        assert!(grid.query(point));
    }
    // Deduplication still applies on the overgrown leaf.
    assert!(!grid.insert(&p2(0.3, 0.3)));
}

#[test]
fn tolerant_duplicates_rejected_within_cell() {
    let mut grid = Multigrid::<3, f32>::with_config(Boundary::unit(), 10.0, 8);
    assert!(grid.insert(&p3(0.0, 0.0, 0.0)));
    assert!(!grid.insert(&p3(5.0e-8, -5.0e-8, 0.0)));
    assert!(grid.query(&p3(5.0e-8, -5.0e-8, 0.0)));
    assert_eq!(grid.num_points(), 1);
}

#[test]
fn removal_tombstones_and_reuses_arena_slots() {
    let mut grid = Multigrid::<2, f32>::new(Boundary::unit());
    assert!(grid.insert(&p2(0.1, 0.1)));
    assert!(grid.insert(&p2(0.5, 0.5)));
    assert!(grid.insert(&p2(0.9, 0.9)));
    assert_eq!(grid.arena.slots.len(), 3);

    assert!(grid.remove(&p2(0.5, 0.5)));
    assert!(!grid.query(&p2(0.5, 0.5)));
    assert!(!grid.remove(&p2(0.5, 0.5)));
    // The slot is tombstoned, not reclaimed.
    assert_eq!(grid.arena.slots.len(), 3);
    assert_eq!(grid.arena.free.len(), 1);
    assert_eq!(grid.num_points(), 2);

    // The next insertion reuses the tombstone instead of growing the arena.
    assert!(grid.insert(&p2(0.4, 0.6)));
    assert_eq!(grid.arena.slots.len(), 3);
    assert!(grid.arena.free.is_empty());
    assert_eq!(grid.num_points(), 3);
    assert_eq!(grid.reachable_indices(), grid.num_points());
}

#[test]
fn deep_subdivision_keeps_every_point_reachable() {
    let mut grid = Multigrid::<3, f32>::with_config(Boundary::unit(), 4.0, 2);
    let mut points = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                points.push(p3(
                    0.125 + i as f32 * 0.25,
                    0.125 + j as f32 * 0.25,
                    0.125 + k as f32 * 0.25,
                ));
            }
        }
    }
    for point in &points {
        assert!(grid.insert(point));
    }
    assert_eq!(grid.num_points(), 64);
    assert_eq!(grid.reachable_indices(), 64);
    for point in &points {
        assert!(grid.query(point));
    }

    for point in points.iter().rev() {
        assert!(grid.remove(point));
        assert!(!grid.query(point));
    }
    assert_eq!(grid.num_points(), 0);
    assert_eq!(grid.reachable_indices(), 0);
}

#[test]
fn missing_cells_report_absent() {
    let mut grid = Multigrid::<2, f32>::with_config(Boundary::unit(), 2.0, 2);
    assert!(!grid.query(&p2(0.1, 0.1)));
    assert!(!grid.remove(&p2(0.1, 0.1)));

    assert!(grid.insert(&p2(0.1, 0.1)));
    // Same dimension-0 cell, different point: reaches the leaf and misses.
    assert!(!grid.remove(&p2(0.1, 0.4)));
    // Different dimension-0 cell: no node on the path at all.
    assert!(!grid.remove(&p2(0.9, 0.1)));
}

#[test]
fn clear_adopts_new_boundary() {
    let mut grid = Multigrid::<2, f32>::new(Boundary::unit());
    assert!(grid.insert(&p2(0.5, 0.5)));
    grid.clear(Boundary::splat(Interval::new(0.0, 10.0)));
    assert_eq!(grid.num_points(), 0);
    assert!(!grid.query(&p2(0.5, 0.5)));
    assert!(grid.insert(&p2(5.0, 5.0)));
    assert!(grid.query(&p2(5.0, 5.0)));
}
