//! Gemeinsame Schnittstelle der Kurven-Auswerter.

use crate::core::Plane;
use crate::shared::options::{clamp01, clamp_spacing, SplineShape};
use crate::shared::spline_geometry::{generate_spline_points, nearest_point_index, polyline_length};
use glam::Vec3;

/// Fähigkeit "Kurven-Auswerter": Kontrollpunkte pflegen und Spline-Punkte erzeugen.
///
/// Ungültige Operationen (Phantom-Index, Duplikat, zu wenige Punkte) sind
/// stille No-ops. Rückgabewerte melden, ob sich etwas geändert hat; der
/// Besitzer der Kurve entscheidet daraus, ob er Beobachter benachrichtigt.
pub trait SplineEvaluator {
    /// Form-Parameter (alpha, tension, spacing, Qualität).
    fn shape(&self) -> &SplineShape;
    /// Direkter Zugriff; Werte außerhalb der Bereiche werden erst beim
    /// Erzeugen geklemmt.
    fn shape_mut(&mut self) -> &mut SplineShape;
    /// Constraint-Ebene der Kontrollpunkte.
    fn plane(&self) -> &Plane;
    /// Alle Kontrollpunkte inklusive Phantom-Punkten.
    fn control_points(&self) -> &[Vec3];
    /// Zuletzt erzeugte Spline-Punkte.
    fn spline_points(&self) -> &[Vec3];

    /// Fügt einen Kontrollpunkt hinzu (Projektion, Duplikat-Prüfung, Rahmung).
    fn add_control_point(&mut self, point: Vec3) -> bool;
    /// Verschiebt einen editierbaren Kontrollpunkt (`1..=len-2`).
    fn move_control_point(&mut self, index: usize, point: Vec3) -> bool;
    /// Entfernt den letzten echten Punkt; bei ≤4 Punkten wird alles geleert.
    fn remove_last_segment(&mut self);
    /// Leert Kontroll- und Spline-Punkte.
    fn clear(&mut self);
    /// Leert nur die Kontrollpunkte.
    fn clear_control_points(&mut self);
    /// Ersetzt die Kontrollpunkte durch eine bereits gerahmte Liste (0 oder ≥4 Punkte).
    fn load_framed_control_points(&mut self, points: &[Vec3]) -> bool;
    /// Erzeugt die Spline-Punkte neu. `true`, wenn sich das Ergebnis geändert hat.
    fn generate(&mut self) -> bool;

    /// Ersetzt alle Kontrollpunkte über den normalen Add-Pfad und erzeugt neu.
    fn generate_from(&mut self, points: &[Vec3]) -> bool {
        self.clear_control_points();
        self.add_control_points(points);
        self.generate()
    }

    /// Fügt mehrere Punkte hinzu; gibt die Anzahl tatsächlich aufgenommener zurück.
    fn add_control_points(&mut self, points: &[Vec3]) -> usize {
        points
            .iter()
            .filter(|&&p| self.add_control_point(p))
            .count()
    }

    /// Ruft `visit(punkt, index)` für alle editierbaren Kontrollpunkte auf.
    fn for_each_control_point(&self, visit: &mut dyn FnMut(Vec3, usize)) {
        let points = self.control_points();
        if points.len() < 3 {
            return;
        }
        for (index, &point) in points.iter().enumerate().take(points.len() - 1).skip(1) {
            visit(point, index);
        }
    }

    fn alpha(&self) -> f32 {
        self.shape().alpha
    }

    fn tension(&self) -> f32 {
        self.shape().tension
    }

    fn spacing(&self) -> f32 {
        self.shape().spacing
    }

    /// Setzt alpha, geklemmt auf [0, 1].
    fn set_alpha(&mut self, alpha: f32) {
        self.shape_mut().alpha = clamp01(alpha);
    }

    /// Setzt tension, geklemmt auf [0, 1].
    fn set_tension(&mut self, tension: f32) {
        self.shape_mut().tension = clamp01(tension);
    }

    /// Setzt spacing, geklemmt auf [0, ∞).
    fn set_spacing(&mut self, spacing: f32) {
        self.shape_mut().spacing = clamp_spacing(spacing);
    }

    fn is_empty(&self) -> bool {
        self.spline_points().is_empty()
    }

    fn spline_point_count(&self) -> usize {
        self.spline_points().len()
    }

    fn control_point_count(&self) -> usize {
        self.control_points().len()
    }

    /// Länge der erzeugten Polyline.
    fn spline_length(&self) -> f32 {
        polyline_length(self.spline_points())
    }

    /// Index des nächstgelegenen Spline-Punkts; `None` bei leerer Kurve.
    fn nearest_spline_point_index(&self, point: Vec3) -> Option<usize> {
        nearest_point_index(self.spline_points(), point)
    }

    /// Nächstgelegener Spline-Punkt; `None` bei leerer Kurve.
    fn nearest_spline_point(&self, point: Vec3) -> Option<Vec3> {
        self.nearest_spline_point_index(point)
            .map(|i| self.spline_points()[i])
    }
}

/// Erzeugt `spline_points` neu und meldet, ob sich das Ergebnis geändert hat.
///
/// Das alte Ergebnis wandert nach `previous`, damit kein zusätzlicher Puffer
/// allokiert werden muss. Die Form wird vorher geklemmt, da `shape_mut`
/// beliebige Werte zulässt.
pub(crate) fn regenerate(
    control_points: &[Vec3],
    shape: &SplineShape,
    spline_points: &mut Vec<Vec3>,
    previous: &mut Vec<Vec3>,
) -> bool {
    std::mem::swap(spline_points, previous);
    generate_spline_points(control_points, &shape.sanitized(), spline_points);
    let changed = *spline_points != *previous;
    log::debug!(
        "Spline erzeugt: {} Kontrollpunkte → {} Punkte (geändert: {})",
        control_points.len(),
        spline_points.len(),
        changed
    );
    changed
}
