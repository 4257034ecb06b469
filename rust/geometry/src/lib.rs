//! Stria Geometry
//!
//! Geometric primitives for structural-model reconstruction: segments,
//! polylines with curve intent, face tessellation and provenance-preserving
//! mesh consolidation, built on nalgebra.

pub mod error;
pub mod mesh;
pub mod polyline;
pub mod tessellate;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use mesh::{Face, FaceMesh};
pub use polyline::{CurveKind, Polyline};
pub use tessellate::{build_segment, tessellate_face, ElementShape, Segment};
