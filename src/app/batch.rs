//! Batch-Auswertung vieler unabhängiger Kurven.
//!
//! Jede `BatchCatmullRomCurve` besitzt ihre Puffer exklusiv. Ein
//! `GenerateJob` leiht sich Kontrollpunkte lesend und Ausgabepuffer
//! schreibend, deshalb braucht es zwischen Jobs keine Synchronisation.
//! Jobs laufen immer bis zum Ende; es gibt keinen Abbruch.

use super::evaluator::{regenerate, SplineEvaluator};
use crate::core::{BufferPool, CurveBuffers, Plane, PooledBuffers};
use crate::shared::options::{SplineOptions, SplineShape};
use glam::Vec3;
use rayon::prelude::*;
use std::sync::Arc;
use std::thread::{Scope, ScopedJoinHandle};

/// Catmull-Rom-Kurve für die parallele Auswertung.
#[derive(Debug)]
pub struct BatchCatmullRomCurve {
    shape: SplineShape,
    plane: Plane,
    buffers: PooledBuffers,
}

impl BatchCatmullRomCurve {
    /// Erstellt eine Kurve mit eigenen (nicht gepoolten) Puffern.
    pub fn new(shape: SplineShape, plane: Plane) -> Self {
        Self::with_buffers(shape, plane, PooledBuffers::unpooled())
    }

    /// Erstellt eine Kurve, deren Puffer aus `pool` stammen.
    pub fn in_pool(shape: SplineShape, plane: Plane, pool: &Arc<BufferPool>) -> Self {
        Self::with_buffers(shape, plane, pool.acquire())
    }

    /// Erstellt eine Kurve aus geladenen Optionen.
    pub fn from_options(options: &SplineOptions) -> Self {
        Self::new(options.shape, options.plane)
    }

    fn with_buffers(shape: SplineShape, plane: Plane, mut buffers: PooledBuffers) -> Self {
        buffers.clear();
        Self {
            shape: shape.sanitized(),
            plane,
            buffers,
        }
    }

    /// Erstellt die Arbeitseinheit für diese Kurve.
    ///
    /// Der Job leiht die Puffer exklusiv, bis er ausgeführt oder gejoint ist.
    pub fn create_job(&mut self) -> GenerateJob<'_> {
        GenerateJob {
            shape: self.shape,
            buffers: &mut *self.buffers,
        }
    }

    /// Gibt die Puffer explizit an ihren Pool zurück.
    pub fn dispose(self) {
        self.buffers.release();
    }
}

impl SplineEvaluator for BatchCatmullRomCurve {
    fn shape(&self) -> &SplineShape {
        &self.shape
    }

    fn shape_mut(&mut self) -> &mut SplineShape {
        &mut self.shape
    }

    fn plane(&self) -> &Plane {
        &self.plane
    }

    fn control_points(&self) -> &[Vec3] {
        self.buffers.control_points()
    }

    fn spline_points(&self) -> &[Vec3] {
        self.buffers.spline_points()
    }

    fn add_control_point(&mut self, point: Vec3) -> bool {
        self.buffers.push_control_point(&self.plane, point)
    }

    fn move_control_point(&mut self, index: usize, point: Vec3) -> bool {
        self.buffers.move_control_point(&self.plane, index, point)
    }

    fn remove_last_segment(&mut self) {
        self.buffers.remove_last_segment();
    }

    fn clear(&mut self) {
        self.buffers.clear();
    }

    fn clear_control_points(&mut self) {
        self.buffers.control_points.clear();
    }

    fn load_framed_control_points(&mut self, points: &[Vec3]) -> bool {
        self.buffers.load_framed(&self.plane, points)
    }

    /// Führt den eigenen Job sofort aus und wartet darauf.
    fn generate(&mut self) -> bool {
        self.create_job().execute()
    }
}

// ── Jobs ─────────────────────────────────────────────────────────

/// Unabhängige Arbeitseinheit: erzeugt die Spline-Punkte einer Kurve.
pub struct GenerateJob<'a> {
    shape: SplineShape,
    buffers: &'a mut CurveBuffers,
}

impl<'a> GenerateJob<'a> {
    /// Führt den Job im aktuellen Thread aus. `true`, wenn sich das Ergebnis geändert hat.
    pub fn execute(self) -> bool {
        let CurveBuffers {
            control_points,
            spline_points,
            previous,
        } = self.buffers;
        regenerate(control_points, &self.shape, spline_points, previous)
    }

    /// Startet den Job als eigenen Thread im übergebenen Scope.
    pub fn schedule<'scope, 'env>(self, scope: &'scope Scope<'scope, 'env>) -> JobHandle<'scope>
    where
        'a: 'scope,
    {
        JobHandle {
            inner: scope.spawn(move || self.execute()),
        }
    }
}

/// Handle auf einen gestarteten Job.
pub struct JobHandle<'scope> {
    inner: ScopedJoinHandle<'scope, bool>,
}

impl JobHandle<'_> {
    /// Ob der Job bereits fertig ist (blockiert nicht).
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Wartet auf den Job. Eine Panik im Job wird weitergereicht.
    pub fn complete(self) -> bool {
        match self.inner.join() {
            Ok(changed) => changed,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

/// Wartet auf alle Handles; liefert pro Job, ob sich dessen Ergebnis geändert hat.
pub fn complete_all(handles: Vec<JobHandle<'_>>) -> Vec<bool> {
    handles.into_iter().map(JobHandle::complete).collect()
}

/// Erzeugt alle Kurven parallel über den rayon-Pool und wartet auf alle.
///
/// Gibt die Anzahl der Kurven zurück, deren Ergebnis sich geändert hat.
pub fn generate_batch(curves: &mut [BatchCatmullRomCurve]) -> usize {
    curves
        .par_iter_mut()
        .map(|curve| curve.create_job().execute())
        .filter(|&changed| changed)
        .count()
}
