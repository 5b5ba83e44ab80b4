//! Axis-aligned bounding boxes

use crate::point::*;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point3f,
    pub max: Point3f,
}

impl Bounds {
    /// Create bounds from two corners
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Tightest bounds around a set of points, `None` if empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3f>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.expand(p);
        }
        Some(bounds)
    }

    /// Grow the box to contain `point`
    pub fn expand(&mut self, point: &Point3f) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Center of the box
    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// Edge lengths along x, y and z
    pub fn extent(&self) -> Vector3f {
        self.max - self.min
    }

    /// Length of the box diagonal
    pub fn diagonal_length(&self) -> f32 {
        self.extent().norm()
    }

    /// The eight corners, x varying fastest
    pub fn corners(&self) -> [Point3f; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3f::new(lo.x, lo.y, lo.z),
            Point3f::new(hi.x, lo.y, lo.z),
            Point3f::new(lo.x, hi.y, lo.z),
            Point3f::new(hi.x, hi.y, lo.z),
            Point3f::new(lo.x, lo.y, hi.z),
            Point3f::new(hi.x, lo.y, hi.z),
            Point3f::new(lo.x, hi.y, hi.z),
            Point3f::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Whether `point` lies inside or on the box
    pub fn contains(&self, point: &Point3f) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}
