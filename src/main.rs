//! Spline-Benchmark.
//!
//! Vergleicht sequentielle und parallele Auswertung für viele Kurven mit
//! identischen, pseudo-zufälligen Kontrollpunkten.
//!
//! Aufruf: `spline-benchmark [kurven] [kontrollpunkte]`

use catmull_rom_splines::{
    BatchCatmullRomCurve, CatmullRomCurve, CurveSet, SplineEvaluator, SplineOptions,
};
use glam::Vec3;
use std::time::Instant;

const DEFAULT_CURVES: usize = 10;
const DEFAULT_CONTROL_POINTS: usize = 10;
const ROUNDS: u64 = 3;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Spline-Benchmark v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let curve_count = parse_arg(args.next(), DEFAULT_CURVES)?;
    let control_point_count = parse_arg(args.next(), DEFAULT_CONTROL_POINTS)?;

    let options = SplineOptions::load_from_file(&SplineOptions::config_path());

    let mut curves = CurveSet::from_options(&options);
    let ids: Vec<_> = (0..curve_count)
        .map(|_| curves.insert(options.shape, options.plane))
        .collect();
    let mut sequential = CatmullRomCurve::from_options(&options);

    for round in 0..ROUNDS {
        let points = pseudo_random_points(control_point_count, round + 1);

        let start = Instant::now();
        for &id in &ids {
            if let Some(curve) = curves.get_mut(id) {
                curve.clear();
                curve.add_control_points(&points);
            }
        }
        curves.generate_all();
        let batch_points: usize = ids
            .iter()
            .filter_map(|&id| curves.get(id))
            .map(BatchCatmullRomCurve::spline_point_count)
            .sum();
        log::info!(
            "Batch: {} Punkte in {:.3} ms erzeugt",
            batch_points,
            start.elapsed().as_secs_f64() * 1000.0
        );

        let start = Instant::now();
        let mut sequential_points = 0;
        for _ in 0..curve_count {
            sequential.generate_from(&points);
            sequential_points += sequential.spline_point_count();
        }
        log::info!(
            "Sequentiell: {} Punkte in {:.3} ms erzeugt",
            sequential_points,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    Ok(())
}

fn parse_arg(arg: Option<String>, default: usize) -> anyhow::Result<usize> {
    match arg {
        Some(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("Ungültige Anzahl '{}': {}", value, e)),
        None => Ok(default),
    }
}

/// Deterministische Punkte in [-5, 5]² (xorshift, reproduzierbar pro `seed`).
fn pseudo_random_points(count: usize, seed: u64) -> Vec<Vec3> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 40) as f32 / (1u64 << 24) as f32 * 10.0 - 5.0
    };
    (0..count).map(|_| Vec3::new(next(), next(), 0.0)).collect()
}
