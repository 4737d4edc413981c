//! Verwaltung vieler Batch-Kurven mit gemeinsamem Puffer-Pool.
//!
//! Kurven werden über eine `CurveId` adressiert. Beim Entfernen gehen ihre
//! Puffer in den Pool zurück und werden von der nächsten Kurve wiederverwendet.

use super::batch::BatchCatmullRomCurve;
use crate::core::{BufferPool, Plane};
use crate::shared::options::{SplineOptions, SplineShape};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Eindeutige ID einer Kurve innerhalb eines `CurveSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(u64);

impl CurveId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Menge unabhängiger Batch-Kurven.
#[derive(Debug)]
pub struct CurveSet {
    curves: HashMap<CurveId, BatchCatmullRomCurve>,
    pool: Arc<BufferPool>,
    next_id: u64,
    /// Eigener Pool bei fester Thread-Anzahl, sonst der globale rayon-Pool
    thread_pool: Option<rayon::ThreadPool>,
}

impl CurveSet {
    /// Erstellt eine leere Menge mit eigenem Pool.
    pub fn new() -> Self {
        Self {
            curves: HashMap::new(),
            pool: BufferPool::new(),
            next_id: 1,
            thread_pool: None,
        }
    }

    /// Wie `new`, aber mit fester Thread-Anzahl aus den Optionen.
    ///
    /// Der Pool wird einmalig gebaut; schlägt das fehl, wird der globale
    /// rayon-Pool verwendet.
    pub fn from_options(options: &SplineOptions) -> Self {
        let thread_pool = if options.batch_threads > 0 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(options.batch_threads)
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    log::warn!("Thread-Pool nicht erstellt, verwende Standard-Pool: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self {
            thread_pool,
            ..Self::new()
        }
    }

    /// Thread-Anzahl des eigenen Pools; `None` beim globalen rayon-Pool.
    pub fn fixed_thread_count(&self) -> Option<usize> {
        self.thread_pool
            .as_ref()
            .map(rayon::ThreadPool::current_num_threads)
    }

    /// Gemeinsamer Puffer-Pool.
    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    /// Legt eine leere Kurve an und gibt ihre ID zurück.
    pub fn insert(&mut self, shape: SplineShape, plane: Plane) -> CurveId {
        let id = CurveId(self.next_id);
        self.next_id += 1;
        let curve = BatchCatmullRomCurve::in_pool(shape, plane, &self.pool);
        self.curves.insert(id, curve);
        id
    }

    pub fn get(&self, id: CurveId) -> Option<&BatchCatmullRomCurve> {
        self.curves.get(&id)
    }

    pub fn get_mut(&mut self, id: CurveId) -> Option<&mut BatchCatmullRomCurve> {
        self.curves.get_mut(&id)
    }

    /// Entfernt eine Kurve und gibt ihre Puffer an den Pool zurück.
    pub fn remove(&mut self, id: CurveId) -> bool {
        match self.curves.remove(&id) {
            Some(curve) => {
                curve.dispose();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Alle IDs in aufsteigender Reihenfolge.
    pub fn ids(&self) -> Vec<CurveId> {
        let mut ids: Vec<CurveId> = self.curves.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Erzeugt alle Kurven parallel und wartet auf alle.
    ///
    /// Gibt die IDs der Kurven zurück, deren Ergebnis sich geändert hat (sortiert).
    pub fn generate_all(&mut self) -> Vec<CurveId> {
        let run = |curves: &mut HashMap<CurveId, BatchCatmullRomCurve>| -> Vec<CurveId> {
            curves
                .par_iter_mut()
                .filter_map(|(&id, curve)| curve.create_job().execute().then_some(id))
                .collect()
        };

        let curves = &mut self.curves;
        let mut changed = match &self.thread_pool {
            Some(pool) => pool.install(|| run(curves)),
            None => run(curves),
        };

        changed.sort_unstable();
        log::debug!(
            "{} Kurven erzeugt, {} geändert",
            self.curves.len(),
            changed.len()
        );
        changed
    }
}

impl Default for CurveSet {
    fn default() -> Self {
        Self::new()
    }
}
