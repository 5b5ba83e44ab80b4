//! Core data structures and traits for kiwi
//!
//! This crate provides the geometry types shared by the volume filters, the
//! picking algorithms and the scene representations: point aliases, polygonal
//! meshes, axis-aligned bounds, the slicing [`Axis`] and the common error type.

pub mod axis;
pub mod bounds;
pub mod error;
pub mod mesh;
pub mod point;
pub mod traits;

pub use axis::*;
pub use bounds::*;
pub use error::*;
pub use mesh::*;
pub use point::*;
pub use traits::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3, Vector4};
