//! Ebenen-Constraint für Kontrollpunkte.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Ebene, auf die neue und verschobene Kontrollpunkte projiziert werden.
///
/// Die Normale muss nicht normiert sein. Eine Null-Normale bedeutet
/// "keine Projektion" (nur der Offset wird addiert) und ist der Standardwert.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Plane {
    /// Ein Punkt auf der Ebene
    pub origin: Vec3,
    /// Ebenen-Normale (wird intern normiert)
    pub normal: Vec3,
    /// Verschiebung, die nach der Projektion addiert wird
    pub offset: Vec3,
}

impl Plane {
    /// Erstellt eine Ebene aus Ursprung, Normale und Offset.
    pub fn new(origin: Vec3, normal: Vec3, offset: Vec3) -> Self {
        Self {
            origin,
            normal,
            offset,
        }
    }

    /// XY-Ebene durch den Ursprung (Normale = +Z).
    pub fn xy() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z, Vec3::ZERO)
    }

    /// XZ-Ebene durch den Ursprung (Normale = +Y).
    pub fn xz() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, Vec3::ZERO)
    }

    /// Projiziert `point` auf die Ebene und addiert anschließend den Offset.
    ///
    /// Entfernt den Anteil von `point - origin` entlang der normierten Normale.
    pub fn constrain(&self, point: Vec3) -> Vec3 {
        let n = self.normal.normalize_or_zero();
        let along_normal = (point - self.origin).dot(n) * n;
        point - along_normal + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constrain_xy_drops_z() {
        let plane = Plane::xy();
        let p = plane.constrain(Vec3::new(1.0, 2.0, 5.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_constrain_unnormalized_normal() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let p = plane.constrain(Vec3::new(-4.0, 7.0, -1.0));
        assert_relative_eq!(p.z, 3.0);
        assert_relative_eq!(p.x, -4.0);
    }

    #[test]
    fn test_constrain_applies_offset_after_projection() {
        let plane = Plane::new(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 1.5, 0.0));
        let p = plane.constrain(Vec3::new(2.0, 9.0, 3.0));
        assert_relative_eq!(p.y, 1.5);
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn test_default_plane_is_identity() {
        // Null-Normale → keine Projektion
        let p = Vec3::new(1.0, -2.0, 3.5);
        assert_eq!(Plane::default().constrain(p), p);
    }

    #[test]
    fn test_constrain_is_idempotent() {
        let plane = Plane::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 2.0, -1.0), Vec3::ZERO);
        let once = plane.constrain(Vec3::new(4.0, -3.0, 8.0));
        let twice = plane.constrain(once);
        assert!(once.distance(twice) < 1e-5);
    }
}
