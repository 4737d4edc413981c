//! Kurven-Auswerter: sequentiell, als Batch-Jobs und als Kurven-Menge.

pub mod batch;
pub mod catmull_rom;
pub mod curve_set;
mod evaluator;

pub use batch::{complete_all, generate_batch, BatchCatmullRomCurve, GenerateJob, JobHandle};
pub use catmull_rom::CatmullRomCurve;
pub use curve_set::{CurveId, CurveSet};
pub use evaluator::SplineEvaluator;
