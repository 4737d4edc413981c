#![no_main]

use catmull_rom_splines::{
    BatchCatmullRomCurve, CatmullRomCurve, Plane, SplineEvaluator, SplineShape,
};
use glam::Vec3;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((header, body)) = data.split_first_chunk::<3>() else {
        return;
    };
    let shape = SplineShape::new(
        header[0] as f32 / 255.0,
        header[1] as f32 / 255.0,
        header[2] as f32 / 64.0,
    );

    // Koordinaten aus je 2 Bytes, begrenzt auf ±327.68
    let points: Vec<Vec3> = body
        .chunks_exact(6)
        .take(64)
        .map(|c| {
            let coord = |i: usize| i16::from_le_bytes([c[i], c[i + 1]]) as f32 / 100.0;
            Vec3::new(coord(0), coord(2), coord(4))
        })
        .collect();

    let mut seq = CatmullRomCurve::new(shape, Plane::xy());
    let mut batch = BatchCatmullRomCurve::new(shape, Plane::xy());
    seq.generate_from(&points);
    batch.generate_from(&points);

    assert_eq!(seq.spline_points(), batch.spline_points());
    assert!(seq.spline_points().iter().all(|p| p.is_finite()));

    // Nicht-endliche Punkte werden abgewiesen
    assert!(!seq.add_control_point(Vec3::new(f32::NAN, 0.0, 0.0)));
    assert!(!batch.add_control_point(Vec3::splat(f32::INFINITY)));
});
