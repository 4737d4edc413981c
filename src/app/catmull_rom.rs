//! Sequentielle Catmull-Rom-Kurve.
//!
//! **Ablauf:** Kontrollpunkte hinzufügen/verschieben → `generate()` erzeugt
//! die komplette Punktliste synchron neu (kein inkrementelles Patchen).

use super::evaluator::{regenerate, SplineEvaluator};
use crate::core::{ControlPoints, Plane};
use crate::shared::options::{SplineOptions, SplineShape, SPLINE_POINT_CAPACITY};
use glam::Vec3;

/// Catmull-Rom-Kurve mit sequentieller Auswertung.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    shape: SplineShape,
    control_points: ControlPoints,
    spline_points: Vec<Vec3>,
    /// Vorheriges Ergebnis, zur Änderungserkennung
    previous: Vec<Vec3>,
}

impl CatmullRomCurve {
    /// Erstellt eine leere Kurve; Parameter werden geklemmt.
    pub fn new(shape: SplineShape, plane: Plane) -> Self {
        Self {
            shape: shape.sanitized(),
            control_points: ControlPoints::new(plane),
            spline_points: Vec::with_capacity(SPLINE_POINT_CAPACITY),
            previous: Vec::with_capacity(SPLINE_POINT_CAPACITY),
        }
    }

    /// Erstellt eine leere Kurve aus geladenen Optionen.
    pub fn from_options(options: &SplineOptions) -> Self {
        Self::new(options.shape, options.plane)
    }

    /// Kontrollpunkt-Speicher (nur lesend).
    pub fn store(&self) -> &ControlPoints {
        &self.control_points
    }
}

impl Default for CatmullRomCurve {
    fn default() -> Self {
        Self::new(SplineShape::default(), Plane::default())
    }
}

impl SplineEvaluator for CatmullRomCurve {
    fn shape(&self) -> &SplineShape {
        &self.shape
    }

    fn shape_mut(&mut self) -> &mut SplineShape {
        &mut self.shape
    }

    fn plane(&self) -> &Plane {
        self.control_points.plane()
    }

    fn control_points(&self) -> &[Vec3] {
        self.control_points.as_slice()
    }

    fn spline_points(&self) -> &[Vec3] {
        &self.spline_points
    }

    fn add_control_point(&mut self, point: Vec3) -> bool {
        self.control_points.add(point)
    }

    fn move_control_point(&mut self, index: usize, point: Vec3) -> bool {
        self.control_points.move_point(index, point)
    }

    fn remove_last_segment(&mut self) {
        if self.control_points.len() <= 4 {
            self.clear();
            return;
        }
        self.control_points.remove_last_segment();
    }

    fn clear(&mut self) {
        self.control_points.clear();
        self.spline_points.clear();
    }

    fn clear_control_points(&mut self) {
        self.control_points.clear();
    }

    fn load_framed_control_points(&mut self, points: &[Vec3]) -> bool {
        self.control_points.load_framed(points)
    }

    fn generate(&mut self) -> bool {
        regenerate(
            self.control_points.as_slice(),
            &self.shape,
            &mut self.spline_points,
            &mut self.previous,
        )
    }

    fn for_each_control_point(&self, visit: &mut dyn FnMut(Vec3, usize)) {
        self.control_points.for_each_editable(visit);
    }
}
