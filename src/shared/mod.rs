//! Layer-neutrale Geometrie und Konfiguration.
//!
//! Sequentielle und Batch-Auswertung nutzen dieselben Funktionen,
//! damit beide Varianten numerisch identisch bleiben.

pub mod options;
pub mod spline_geometry;

pub use options::{SamplingMode, SplineOptions, SplineShape};
pub use spline_geometry::{generate_spline_points, ArcLengthSampler, CubicSegment};
