//! Property-Tests: sequentielle und Batch-Kurve bleiben unter beliebigen
//! Editier-Folgen deckungsgleich und liefern immer endliche Punkte.

use catmull_rom_splines::{
    BatchCatmullRomCurve, CatmullRomCurve, Plane, SplineEvaluator, SplineShape,
};
use glam::Vec3;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Add(Vec3),
    Move(usize, Vec3),
    RemoveLastSegment,
}

/// Punkte auf einem groben Raster, damit Duplikate regelmäßig vorkommen.
fn grid_point() -> impl Strategy<Value = Vec3> {
    (-20i32..20, -20i32..20, -4i32..4)
        .prop_map(|(x, y, z)| Vec3::new(x as f32 * 0.5, y as f32 * 0.5, z as f32))
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        6 => grid_point().prop_map(Edit::Add),
        2 => (0usize..12, grid_point()).prop_map(|(i, p)| Edit::Move(i, p)),
        1 => Just(Edit::RemoveLastSegment),
    ]
}

fn shape() -> impl Strategy<Value = SplineShape> {
    (0.0f32..=1.0, 0.0f32..=1.0, prop_oneof![Just(0.0f32), 0.1f32..2.0])
        .prop_map(|(alpha, tension, spacing)| SplineShape::new(alpha, tension, spacing))
}

fn apply(curve: &mut dyn SplineEvaluator, edit: &Edit) -> bool {
    match *edit {
        Edit::Add(p) => curve.add_control_point(p),
        Edit::Move(i, p) => curve.move_control_point(i, p),
        Edit::RemoveLastSegment => {
            curve.remove_last_segment();
            true
        }
    }
}

// Property: beide Speicher konvergieren zur selben Reihenfolge
proptest! {
    #[test]
    fn prop_sequential_and_batch_converge(
        edits in prop::collection::vec(edit(), 0..24),
        shape in shape(),
    ) {
        let mut seq = CatmullRomCurve::new(shape, Plane::xy());
        let mut batch = BatchCatmullRomCurve::new(shape, Plane::xy());

        for edit in &edits {
            let seq_result = apply(&mut seq, edit);
            let batch_result = apply(&mut batch, edit);
            prop_assert_eq!(seq_result, batch_result);
            prop_assert_eq!(seq.control_points(), batch.control_points());
        }

        prop_assert_eq!(seq.generate(), batch.generate());
        prop_assert_eq!(seq.spline_points(), batch.spline_points());
    }
}

// Property: Rahmung bleibt erhalten (0, 1 oder ≥4 Punkte, alle in der Ebene)
proptest! {
    #[test]
    fn prop_control_point_count_is_framed(edits in prop::collection::vec(edit(), 0..24)) {
        let mut curve = CatmullRomCurve::new(SplineShape::default(), Plane::xy());
        for edit in &edits {
            apply(&mut curve, edit);
            let len = curve.control_point_count();
            prop_assert!(len <= 1 || len >= 4, "ungültige Länge {}", len);
            prop_assert!(curve.control_points().iter().all(|p| p.z == 0.0));
        }
    }
}

// Property: Ausgabe ist endlich, leer genau bei < 4 Kontrollpunkten, Generate idempotent
proptest! {
    #[test]
    fn prop_generate_output_is_finite_and_idempotent(
        edits in prop::collection::vec(edit(), 0..24),
        shape in shape(),
    ) {
        let mut curve = BatchCatmullRomCurve::new(shape, Plane::xy());
        for edit in &edits {
            apply(&mut curve, edit);
        }

        curve.generate();
        prop_assert_eq!(curve.is_empty(), curve.control_point_count() < 4);
        prop_assert!(curve.spline_points().iter().all(|p| p.is_finite()));

        let first = curve.spline_points().to_vec();
        prop_assert!(!curve.generate());
        prop_assert_eq!(curve.spline_points(), first.as_slice());
    }
}

// Property: die Kurve interpoliert alle echten Kontrollpunkte
proptest! {
    #[test]
    fn prop_curve_passes_through_real_points(
        points in prop::collection::vec(grid_point(), 2..10),
        shape in shape(),
    ) {
        let mut curve = CatmullRomCurve::new(shape, Plane::xy());
        curve.generate_from(&points);
        prop_assume!(curve.control_point_count() >= 4);

        let mut real = Vec::new();
        curve.for_each_control_point(&mut |p, _| real.push(p));
        for p in real {
            prop_assert!(curve.spline_points().contains(&p), "{:?} fehlt", p);
        }
    }
}
