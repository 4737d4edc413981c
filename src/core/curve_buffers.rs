//! Puffer der Batch-Kurven und deren Pool.
//!
//! Jede Batch-Kurve besitzt ihre Kontroll- und Spline-Punkte exklusiv.
//! Die Puffer stammen aus einem `BufferPool` und gehen beim Drop des
//! `PooledBuffers`-Guards zurück in den Pool, statt bei jeder Kurve neu
//! allokiert zu werden.

use super::control_points::{constrain_framed, constrain_point, editable_range, phantom_frame};
use super::Plane;
use crate::shared::options::{CONTROL_POINT_CAPACITY, SPLINE_POINT_CAPACITY};
use glam::Vec3;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Kontroll- und Spline-Punkte einer Batch-Kurve.
///
/// Kontrollpunkte folgen derselben Rahmung wie `ControlPoints`, neue Punkte
/// werden aber per "Shift-and-Append" eingefügt: der neue Punkt ersetzt das
/// End-Phantom, das danach wieder angehängt wird.
#[derive(Debug, Clone, Default)]
pub struct CurveBuffers {
    pub(crate) control_points: Vec<Vec3>,
    pub(crate) spline_points: Vec<Vec3>,
    /// Vorheriges Ergebnis, zur Änderungserkennung
    pub(crate) previous: Vec<Vec3>,
}

impl CurveBuffers {
    /// Allokiert Puffer mit den Standard-Kapazitäten.
    pub fn with_default_capacity() -> Self {
        Self {
            control_points: Vec::with_capacity(CONTROL_POINT_CAPACITY),
            spline_points: Vec::with_capacity(SPLINE_POINT_CAPACITY),
            previous: Vec::with_capacity(SPLINE_POINT_CAPACITY),
        }
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    pub fn spline_points(&self) -> &[Vec3] {
        &self.spline_points
    }

    /// Fügt einen Punkt nach Projektion hinzu (Shift-and-Append).
    pub fn push_control_point(&mut self, plane: &Plane, point: Vec3) -> bool {
        let Some(point) = constrain_point(plane, point) else {
            return false;
        };
        if self.control_points.contains(&point) {
            return false;
        }

        match self.control_points.len() {
            0 => self.control_points.push(point),
            1 => {
                let frame = phantom_frame(self.control_points[0], point);
                self.control_points.clear();
                self.control_points.extend_from_slice(&frame);
            }
            _ => {
                if let Some(last) = self.control_points.last_mut() {
                    let end_phantom = std::mem::replace(last, point);
                    self.control_points.push(end_phantom);
                }
            }
        }
        true
    }

    /// Überschreibt einen editierbaren Kontrollpunkt (nach Projektion).
    pub fn move_control_point(&mut self, plane: &Plane, index: usize, point: Vec3) -> bool {
        if !editable_range(self.control_points.len()).contains(&index) {
            return false;
        }
        let Some(point) = constrain_point(plane, point) else {
            return false;
        };
        self.control_points[index] = point;
        true
    }

    /// Ersetzt die Kontrollpunkte durch eine bereits gerahmte Liste.
    pub fn load_framed(&mut self, plane: &Plane, points: &[Vec3]) -> bool {
        let Some(projected) = constrain_framed(plane, points) else {
            return false;
        };
        self.control_points.clear();
        self.control_points.extend(projected);
        true
    }

    /// Entfernt den letzten echten Punkt; bei ≤4 Punkten wird alles geleert.
    pub fn remove_last_segment(&mut self) {
        if self.control_points.len() <= 4 {
            self.clear();
            return;
        }
        let index = self.control_points.len() - 2;
        self.control_points.remove(index);
    }

    /// Leert Kontroll- und Spline-Punkte, die Kapazität bleibt erhalten.
    pub fn clear(&mut self) {
        self.control_points.clear();
        self.spline_points.clear();
        self.previous.clear();
    }
}

// ── Pool ─────────────────────────────────────────────────────────

/// Gemeinsamer Pool für Kurven-Puffer.
///
/// `outstanding()` zählt ausgegebene, noch nicht zurückgegebene Puffer.
#[derive(Debug, Default)]
pub struct BufferPool {
    free: Mutex<Vec<CurveBuffers>>,
    outstanding: AtomicUsize,
}

impl BufferPool {
    /// Erstellt einen leeren, teilbaren Pool.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Entnimmt Puffer (wiederverwendet oder neu allokiert).
    pub fn acquire(self: &Arc<Self>) -> PooledBuffers {
        let reused = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let buffers = reused.unwrap_or_else(CurveBuffers::with_default_capacity);
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        PooledBuffers {
            buffers,
            pool: Some(Arc::clone(self)),
        }
    }

    /// Anzahl ausgegebener Puffer, die noch nicht zurückgegeben wurden.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Anzahl freier Puffer im Pool.
    pub fn available(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn release(&self, mut buffers: CurveBuffers) {
        buffers.clear();
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(buffers);
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Guard um `CurveBuffers`; gibt die Puffer beim Drop an den Pool zurück.
#[derive(Debug)]
pub struct PooledBuffers {
    buffers: CurveBuffers,
    pool: Option<Arc<BufferPool>>,
}

impl PooledBuffers {
    /// Puffer ohne Pool (werden beim Drop einfach freigegeben).
    pub fn unpooled() -> Self {
        Self {
            buffers: CurveBuffers::with_default_capacity(),
            pool: None,
        }
    }

    /// Gibt die Puffer sofort zurück (entspricht Drop).
    pub fn release(self) {}
}

impl Deref for PooledBuffers {
    type Target = CurveBuffers;

    fn deref(&self) -> &CurveBuffers {
        &self.buffers
    }
}

impl DerefMut for PooledBuffers {
    fn deref_mut(&mut self) -> &mut CurveBuffers {
        &mut self.buffers
    }
}

impl Drop for PooledBuffers {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.release(std::mem::take(&mut self.buffers));
        }
    }
}
