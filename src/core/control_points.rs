//! Kontrollpunkt-Speicher der sequentiellen Kurve.
//!
//! Die Liste ist entweder leer, hält genau einen wartenden Punkt oder ist
//! "gerahmt": Index 0 und `len - 1` sind Phantom-Punkte, die nur der
//! 4-Punkt-Stencil braucht. Editierbar sind ausschließlich `1..=len-2`.
//!
//! Duplikate werden per **exakter** Gleichheit erkannt, nicht per Toleranz.
//! Ein um 1e-7 verschobener Punkt gilt als neu.

use super::Plane;
use crate::shared::options::{CONTROL_POINT_CAPACITY, MAX_COORDINATE, PHANTOM_DISTANCE};
use glam::Vec3;
use std::ops::Range;

/// Baut die gerahmte 4-Punkt-Liste aus den ersten beiden echten Punkten.
///
/// Die Phantom-Punkte liegen `PHANTOM_DISTANCE` vor `first` bzw. hinter
/// `second`, entlang der normierten Richtung `first → second`.
pub fn phantom_frame(first: Vec3, second: Vec3) -> [Vec3; 4] {
    let dir = (second - first).normalize_or_zero();
    [
        first - dir * PHANTOM_DISTANCE,
        first,
        second,
        second + dir * PHANTOM_DISTANCE,
    ]
}

/// Index-Bereich der editierbaren Punkte einer Liste der Länge `len`.
pub fn editable_range(len: usize) -> Range<usize> {
    if len < 3 {
        return 0..0;
    }
    1..len - 1
}

/// Projiziert `point` auf die Ebene und prüft den Wertebereich.
///
/// `None` bei nicht endlichen Koordinaten oder Beträgen über
/// `MAX_COORDINATE` (mit `log::warn!`).
pub fn constrain_point(plane: &Plane, point: Vec3) -> Option<Vec3> {
    let projected = plane.constrain(point);
    if !within_range(projected) {
        log::warn!("Kontrollpunkt ignoriert (außerhalb des Wertebereichs): {:?}", projected);
        return None;
    }
    Some(projected)
}

/// Projiziert eine bereits gerahmte Liste (0 oder ≥4 Punkte).
///
/// `None` bei 1–3 Punkten oder wenn ein Punkt außerhalb des Wertebereichs liegt.
pub fn constrain_framed(plane: &Plane, points: &[Vec3]) -> Option<Vec<Vec3>> {
    if (1..4).contains(&points.len()) {
        return None;
    }
    let projected: Vec<Vec3> = points.iter().map(|&p| plane.constrain(p)).collect();
    if !projected.iter().all(|&p| within_range(p)) {
        log::warn!("Gerahmte Kontrollpunkte ignoriert (außerhalb des Wertebereichs)");
        return None;
    }
    Some(projected)
}

fn within_range(point: Vec3) -> bool {
    point.is_finite() && point.abs().max_element() <= MAX_COORDINATE
}

/// Sequentieller Kontrollpunkt-Speicher (Einfügen vor dem End-Phantom).
#[derive(Debug, Clone)]
pub struct ControlPoints {
    points: Vec<Vec3>,
    plane: Plane,
}

impl ControlPoints {
    /// Erstellt einen leeren Speicher mit Constraint-Ebene.
    pub fn new(plane: Plane) -> Self {
        Self {
            points: Vec::with_capacity(CONTROL_POINT_CAPACITY),
            plane,
        }
    }

    /// Constraint-Ebene dieses Speichers.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Alle Punkte inklusive Phantom-Punkten.
    pub fn as_slice(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fügt einen Punkt nach Projektion auf die Ebene hinzu.
    ///
    /// Gibt `false` zurück, wenn der projizierte Punkt bereits existiert
    /// oder außerhalb des Wertebereichs liegt.
    pub fn add(&mut self, point: Vec3) -> bool {
        let Some(point) = constrain_point(&self.plane, point) else {
            return false;
        };
        if self.points.contains(&point) {
            return false;
        }

        if self.points.len() == 1 {
            let frame = phantom_frame(self.points[0], point);
            self.points.clear();
            self.points.extend_from_slice(&frame);
        } else {
            // Vor dem End-Phantom einfügen (bei leerer Liste: Index 0)
            let insert_index = self.points.len().saturating_sub(1);
            self.points.insert(insert_index, point);
        }
        true
    }

    /// Überschreibt einen editierbaren Punkt (nach Projektion).
    ///
    /// Phantom-Indizes und Indizes außerhalb der Liste sind ein No-op.
    pub fn move_point(&mut self, index: usize, point: Vec3) -> bool {
        if !editable_range(self.points.len()).contains(&index) {
            return false;
        }
        let Some(point) = constrain_point(&self.plane, point) else {
            return false;
        };
        self.points[index] = point;
        true
    }

    /// Ruft `visit(punkt, index)` für alle editierbaren Punkte auf.
    pub fn for_each_editable(&self, mut visit: impl FnMut(Vec3, usize)) {
        for index in editable_range(self.points.len()) {
            visit(self.points[index], index);
        }
    }

    /// Iterator über `(index, punkt)` aller editierbaren Punkte.
    pub fn editable(&self) -> impl Iterator<Item = (usize, Vec3)> + '_ {
        editable_range(self.points.len()).map(move |i| (i, self.points[i]))
    }

    /// Entfernt den letzten echten Punkt; bei ≤4 Punkten wird alles geleert.
    pub fn remove_last_segment(&mut self) {
        if self.points.len() <= 4 {
            self.points.clear();
            return;
        }
        let index = self.points.len() - 2;
        self.points.remove(index);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Ersetzt den Inhalt durch eine bereits gerahmte Liste.
    ///
    /// Jeder Punkt wird projiziert. Listen mit 1–3 Punkten verletzen die
    /// Rahmung und werden abgelehnt (`false`, Inhalt unverändert).
    pub fn load_framed(&mut self, points: &[Vec3]) -> bool {
        let Some(projected) = constrain_framed(&self.plane, points) else {
            return false;
        };
        self.points = projected;
        true
    }
}

#[cfg(test)]
mod tests;
