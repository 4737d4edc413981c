//! Reine Geometrie-Funktionen für zentripetale Catmull-Rom-Splines.
//!
//! Layer-neutral: sequentielle Kurve und Batch-Jobs rufen dieselben
//! Funktionen auf und liefern dadurch bitgleiche Ergebnisse.

use super::options::{
    SamplingMode, SplineShape, FIXED_STEP_SAMPLES, LENGTH_ESTIMATE_STEP, MAX_DIVISIONS,
};
use glam::Vec3;

/// Kubisches Polynom eines Segments in Potenzbasis: `a·t³ + b·t² + c·t + d`.
///
/// Verläuft für t ∈ [0, 1] von `p1` (t = 0) nach `p2` (t = 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub d: Vec3,
    /// Exakter Endpunkt p2 (a+b+c+d nur bis auf Rundung)
    end: Vec3,
}

/// Knoten-Abstand `‖to - from‖^alpha`, nach unten auf `f32::EPSILON` begrenzt.
///
/// Bei zusammenfallenden Punkten wird der zugehörige Tangenten-Term dadurch
/// null statt NaN.
fn knot_interval(from: Vec3, to: Vec3, alpha: f32) -> f32 {
    from.distance(to).powf(alpha).max(f32::EPSILON)
}

impl CubicSegment {
    /// Löst das Segment p1 → p2 aus vier aufeinanderfolgenden Kontrollpunkten.
    ///
    /// Knoten: zentripetal mit Exponent `alpha`. Tangenten werden mit
    /// `1 - tension` skaliert und über Hermite in Potenzbasis umgerechnet.
    pub fn from_stencil(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, alpha: f32, tension: f32) -> Self {
        let dt01 = knot_interval(p0, p1, alpha);
        let dt12 = knot_interval(p1, p2, alpha);
        let dt23 = knot_interval(p2, p3, alpha);

        // t2 - t0 und t3 - t1
        let dt02 = dt01 + dt12;
        let dt13 = dt12 + dt23;

        let scale = (1.0 - tension) * dt12;
        let m1 = scale * ((p1 - p0) / dt01 - (p2 - p0) / dt02 + (p2 - p1) / dt12);
        let m2 = scale * ((p2 - p1) / dt12 - (p3 - p1) / dt13 + (p3 - p2) / dt23);

        Self {
            a: 2.0 * (p1 - p2) + m1 + m2,
            b: -3.0 * (p1 - p2) - 2.0 * m1 - m2,
            c: m1,
            d: p1,
            end: p2,
        }
    }

    /// Wie `from_stencil`, aber aus einem 4er-Fenster und den Form-Parametern.
    pub fn from_window(window: &[Vec3; 4], shape: &SplineShape) -> Self {
        let [p0, p1, p2, p3] = *window;
        Self::from_stencil(p0, p1, p2, p3, shape.alpha, shape.tension)
    }

    /// Position bei Parameter `t`. Für `t >= 1` exakt der Endpunkt.
    pub fn position(&self, t: f32) -> Vec3 {
        if t >= 1.0 {
            return self.end;
        }
        let t2 = t * t;
        let t3 = t2 * t;
        self.a * t3 + self.b * t2 + self.c * t + self.d
    }

    pub fn start_point(&self) -> Vec3 {
        self.d
    }

    pub fn end_point(&self) -> Vec3 {
        self.end
    }

    /// Schätzt die Segmentlänge über eine Polyline mit Parameter-Schritt `step`.
    pub fn estimate_length(&self, step: f32) -> f32 {
        let samples = if step > 0.0 && step < 1.0 {
            (1.0 / step).ceil() as usize
        } else {
            1
        };

        let mut length = 0.0;
        let mut previous = self.d;
        for i in 1..samples {
            let point = self.position(i as f32 * step);
            length += previous.distance(point);
            previous = point;
        }
        length + previous.distance(self.end)
    }
}

/// Iteriert alle inneren Segmente einer gerahmten Kontrollpunkt-Liste.
///
/// Für `n` Punkte entstehen `n - 3` Segmente (Stencil `i-1 .. i+2`).
pub fn segments<'a>(
    control_points: &'a [Vec3],
    shape: &'a SplineShape,
) -> impl Iterator<Item = CubicSegment> + 'a {
    control_points.windows(4).map(move |w| {
        let window = [w[0], w[1], w[2], w[3]];
        CubicSegment::from_window(&window, shape)
    })
}

// ── Abtastung ────────────────────────────────────────────────────

/// Tastet ein Segment in festen Parameter-Schritten ab (1/10).
///
/// Erzeugt `FIXED_STEP_SAMPLES` Punkte für t ∈ [0, 1) und hängt danach immer
/// den exakten Endpunkt an.
pub fn sample_fixed_step(segment: &CubicSegment, out: &mut Vec<Vec3>) {
    for i in 0..FIXED_STEP_SAMPLES {
        let t = i as f32 / FIXED_STEP_SAMPLES as f32;
        out.push(segment.position(t));
    }
    out.push(segment.end_point());
}

/// Arc-Length-Abtaster über mehrere aufeinanderfolgende Segmente.
///
/// Der Zustand (letzter gelaufener Punkt, Distanz seit letztem gleichmäßigen
/// Punkt) wird über Segmentgrenzen hinweg mitgeführt.
#[derive(Debug, Clone)]
pub struct ArcLengthSampler {
    spacing: f32,
    divisions_per_unit: f32,
    previous: Vec3,
    distance_since_last: f32,
}

impl ArcLengthSampler {
    /// `start`: erster Punkt der Kurve (bereits ausgegeben).
    pub fn new(start: Vec3, spacing: f32, divisions_per_unit: f32) -> Self {
        Self {
            spacing,
            divisions_per_unit,
            previous: start,
            distance_since_last: 0.0,
        }
    }

    /// Anzahl der Lauf-Schritte für ein Segment (mindestens 1).
    pub fn divisions(&self, segment: &CubicSegment) -> usize {
        let estimated = segment.estimate_length(LENGTH_ESTIMATE_STEP);
        let divisions = (estimated * self.divisions_per_unit).ceil();
        if divisions.is_finite() {
            (divisions as usize).clamp(1, MAX_DIVISIONS)
        } else {
            MAX_DIVISIONS
        }
    }

    /// Läuft das Segment ab und gibt Punkte im Abstand `spacing` aus.
    ///
    /// Der Segment-Endpunkt wird immer angehängt, unabhängig vom Abstand.
    pub fn sample_segment(&mut self, segment: &CubicSegment, out: &mut Vec<Vec3>) {
        let divisions = self.divisions(segment);

        for i in 1..=divisions {
            let t = i as f32 / divisions as f32;
            let point = segment.position(t);
            self.distance_since_last += self.previous.distance(point);

            while self.distance_since_last >= self.spacing {
                let overshoot = self.distance_since_last - self.spacing;
                let even_point = point + (self.previous - point).normalize_or_zero() * overshoot;
                out.push(even_point);
                self.previous = even_point;

                // spacing unterhalb der f32-Auflösung: kein Fortschritt mehr
                if overshoot >= self.distance_since_last {
                    self.distance_since_last = 0.0;
                    break;
                }
                self.distance_since_last = overshoot;
            }

            self.previous = point;
        }

        out.push(segment.end_point());
    }
}

/// Erzeugt alle Spline-Punkte für eine gerahmte Kontrollpunkt-Liste.
///
/// `out` wird immer geleert; bei weniger als 4 Kontrollpunkten bleibt es leer.
pub fn generate_spline_points(control_points: &[Vec3], shape: &SplineShape, out: &mut Vec<Vec3>) {
    out.clear();
    if control_points.len() < 4 {
        return;
    }

    match shape.sampling_mode() {
        SamplingMode::FixedStep => {
            out.reserve((control_points.len() - 3) * (FIXED_STEP_SAMPLES + 1));
            for segment in segments(control_points, shape) {
                sample_fixed_step(&segment, out);
            }
        }
        SamplingMode::ArcLength(spacing) => {
            let start = control_points[1];
            out.push(start);
            let mut sampler = ArcLengthSampler::new(start, spacing, shape.divisions_per_unit);
            for segment in segments(control_points, shape) {
                sampler.sample_segment(&segment, out);
            }
        }
    }
}

// ── Abfragen auf Punktlisten ─────────────────────────────────────

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Index des nächstgelegenen Punkts (bei Gleichstand der erste).
pub fn nearest_point_index(points: &[Vec3], target: Vec3) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        let dist = p.distance_squared(target);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}
