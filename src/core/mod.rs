//! Core-Domänentypen: Constraint-Ebene, Kontrollpunkt-Speicher, Kurven-Puffer.

pub mod control_points;
pub mod curve_buffers;
pub mod plane;

pub use control_points::{
    constrain_framed, constrain_point, editable_range, phantom_frame, ControlPoints,
};
pub use curve_buffers::{BufferPool, CurveBuffers, PooledBuffers};
pub use plane::Plane;
