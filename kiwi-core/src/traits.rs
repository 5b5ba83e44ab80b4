//! Core traits for kiwi

use crate::{bounds::Bounds, mesh::PolyMesh, point::Point3f};

/// Trait for drawable/renderable geometry
pub trait Drawable {
    /// Get the bounding box of the object, `None` when it has no points
    fn bounding_box(&self) -> Option<Bounds>;

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        self.bounding_box()
            .map(|b| b.center())
            .unwrap_or_else(Point3f::origin)
    }
}

impl Drawable for PolyMesh {
    fn bounding_box(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}
