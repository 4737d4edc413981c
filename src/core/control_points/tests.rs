use super::*;
use crate::shared::options::MAX_COORDINATE;
use approx::assert_relative_eq;

fn store_with(points: &[Vec3]) -> ControlPoints {
    let mut store = ControlPoints::new(Plane::default());
    for &p in points {
        store.add(p);
    }
    store
}

// ── add ──

#[test]
fn test_first_point_is_held_until_second() {
    let store = store_with(&[Vec3::ZERO]);
    assert_eq!(store.len(), 1);
    assert_eq!(store.editable().count(), 0);
}

#[test]
fn test_second_point_frames_with_phantoms() {
    let store = store_with(&[Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]);
    let pts = store.as_slice();
    assert_eq!(pts.len(), 4);
    assert_eq!(pts[0], Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(pts[1], Vec3::ZERO);
    assert_eq!(pts[2], Vec3::new(4.0, 0.0, 0.0));
    assert_eq!(pts[3], Vec3::new(6.0, 0.0, 0.0));
}

#[test]
fn test_phantom_distance_is_two_units() {
    let a = Vec3::new(1.0, 1.0, 0.0);
    let b = Vec3::new(2.0, 3.0, 0.0);
    let frame = phantom_frame(a, b);
    assert_relative_eq!(frame[0].distance(a), 2.0, epsilon = 1e-5);
    assert_relative_eq!(frame[3].distance(b), 2.0, epsilon = 1e-5);
}

#[test]
fn test_further_points_insert_before_end_phantom() {
    let store = store_with(&[
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(4.0, -1.0, 0.0),
    ]);
    let pts = store.as_slice();
    assert_eq!(pts.len(), 6);
    assert_eq!(pts[3], Vec3::new(2.0, 1.0, 0.0));
    assert_eq!(pts[4], Vec3::new(4.0, -1.0, 0.0));
    // End-Phantom bleibt, wo die Rahmung ihn gesetzt hat
    assert_eq!(pts[5], Vec3::new(3.0, 0.0, 0.0));
}

#[test]
fn test_point_on_phantom_position_counts_as_duplicate() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    assert!(!store.add(Vec3::new(3.0, 0.0, 0.0)));
    assert_eq!(store.len(), 4);
}

#[test]
fn test_exact_duplicate_is_ignored() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    assert!(!store.add(Vec3::X));
    assert_eq!(store.len(), 4);
}

#[test]
fn test_near_duplicate_is_accepted() {
    // Exakte Gleichheit, keine Toleranz
    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    assert!(store.add(Vec3::new(1.0 + 1e-6, 0.0, 0.0)));
    assert_eq!(store.len(), 5);
}

#[test]
fn test_add_projects_onto_plane() {
    let mut store = ControlPoints::new(Plane::xy());
    store.add(Vec3::new(0.0, 0.0, 7.0));
    store.add(Vec3::new(3.0, 4.0, -2.0));
    for (_, p) in store.editable() {
        assert_eq!(p.z, 0.0);
    }
}

#[test]
fn test_projection_collapse_counts_as_duplicate() {
    let mut store = ControlPoints::new(Plane::xy());
    assert!(store.add(Vec3::new(1.0, 1.0, 0.0)));
    assert!(!store.add(Vec3::new(1.0, 1.0, 5.0)));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_non_finite_point_is_rejected() {
    let mut store = store_with(&[Vec3::ZERO]);
    assert!(!store.add(Vec3::new(f32::NAN, 0.0, 0.0)));
    assert!(!store.add(Vec3::new(f32::INFINITY, 0.0, 0.0)));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_point_beyond_coordinate_range_is_rejected() {
    let mut store = store_with(&[Vec3::new(-3.0e38, 0.0, 0.0)]);
    assert!(store.is_empty());

    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    assert!(!store.add(Vec3::new(3.0e38, 1.0e38, 0.0)));
    assert!(!store.add(Vec3::splat(MAX_COORDINATE * 2.0)));
    assert!(store.add(Vec3::new(MAX_COORDINATE, 0.0, 0.0)));
    assert_eq!(store.len(), 5);
}

#[test]
fn test_constrain_point_checks_after_projection() {
    let plane = Plane::new(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 2.0e15));
    assert_eq!(constrain_point(&plane, Vec3::ONE), None);
    assert_eq!(
        constrain_point(&Plane::xy(), Vec3::new(1.0, 2.0, 3.0)),
        Some(Vec3::new(1.0, 2.0, 0.0))
    );
}

// ── move_point ──

#[test]
fn test_move_phantom_indices_is_noop() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    let before = store.as_slice().to_vec();
    assert!(!store.move_point(0, Vec3::splat(9.0)));
    assert!(!store.move_point(3, Vec3::splat(9.0)));
    assert!(!store.move_point(17, Vec3::splat(9.0)));
    assert_eq!(store.as_slice(), before.as_slice());
}

#[test]
fn test_move_interior_updates_exactly_one_point() {
    let mut store = ControlPoints::new(Plane::xy());
    store.add(Vec3::ZERO);
    store.add(Vec3::X);
    let before = store.as_slice().to_vec();
    assert!(store.move_point(2, Vec3::new(5.0, 5.0, 3.0)));
    let after = store.as_slice();
    assert_eq!(after[2], Vec3::new(5.0, 5.0, 0.0));
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[1]);
    assert_eq!(after[3], before[3]);
}

// ── for_each_editable / remove_last_segment ──

#[test]
fn test_for_each_editable_visits_real_points_in_order() {
    let input = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)];
    let store = store_with(&input);
    let mut visited = Vec::new();
    store.for_each_editable(|p, i| visited.push((i, p)));
    assert_eq!(visited, vec![(1, input[0]), (2, input[1]), (3, input[2])]);
}

#[test]
fn test_remove_last_segment_with_four_points_clears() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    store.remove_last_segment();
    assert!(store.is_empty());
}

#[test]
fn test_remove_last_segment_drops_last_real_point() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)]);
    let end_phantom = *store.as_slice().last().unwrap();
    store.remove_last_segment();
    assert_eq!(store.len(), 4);
    assert_eq!(store.as_slice()[2], Vec3::X);
    assert_eq!(*store.as_slice().last().unwrap(), end_phantom);
}

// ── load_framed ──

#[test]
fn test_load_framed_rejects_partial_frames() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    assert!(!store.load_framed(&[Vec3::ZERO, Vec3::X]));
    assert_eq!(store.len(), 4);
    assert!(store.load_framed(&[]));
    assert!(store.is_empty());
}

#[test]
fn test_move_beyond_coordinate_range_is_noop() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)]);
    let before = store.as_slice().to_vec();
    assert!(!store.move_point(2, Vec3::new(3.0e38, 0.0, 0.0)));
    assert_eq!(store.as_slice(), before.as_slice());
}

#[test]
fn test_load_framed_rejects_out_of_range_points() {
    let mut store = store_with(&[Vec3::ZERO, Vec3::X]);
    let framed = [Vec3::ZERO, Vec3::X, Vec3::new(f32::MAX, 0.0, 0.0), Vec3::Y];
    assert!(!store.load_framed(&framed));
    assert_eq!(store.len(), 4);
    assert_eq!(constrain_framed(&Plane::default(), &framed), None);
}

#[test]
fn test_editable_range_small_lists() {
    assert_eq!(editable_range(0), 0..0);
    assert_eq!(editable_range(1), 0..0);
    assert_eq!(editable_range(4), 1..3);
}
