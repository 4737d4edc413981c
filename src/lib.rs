//! Zentripetale Catmull-Rom-Splines.
//! Core-Funktionalität als Library exportiert für Tests, Benchmarks und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    complete_all, generate_batch, BatchCatmullRomCurve, CatmullRomCurve, CurveId, CurveSet,
    GenerateJob, JobHandle, SplineEvaluator,
};
pub use core::{BufferPool, ControlPoints, Plane};
pub use shared::{CubicSegment, SamplingMode, SplineOptions, SplineShape};
