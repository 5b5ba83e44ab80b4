//! Regular-grid scalar volumes and sub-volume extraction

use kiwi_core::{Axis, Bounds, Error, Point3f, Result};
use ndarray::{s, Array3};

/// A scalar field sampled on a regular 3D grid
///
/// Samples are indexed `[x][y][z]`. A slice is an `ImageVolume` with a
/// dimension of one along the sliced axis; its origin is moved so that
/// world positions are preserved.
#[derive(Debug, Clone)]
pub struct ImageVolume {
    scalars: Array3<f32>,
    spacing: [f32; 3],
    origin: Point3f,
}

impl ImageVolume {
    /// Create a zero-filled volume
    pub fn new(dimensions: [usize; 3], spacing: [f32; 3], origin: Point3f) -> Self {
        Self {
            scalars: Array3::zeros((dimensions[0], dimensions[1], dimensions[2])),
            spacing,
            origin,
        }
    }

    /// Wrap an existing array of samples
    pub fn from_array(scalars: Array3<f32>, spacing: [f32; 3], origin: Point3f) -> Result<Self> {
        if scalars.is_empty() {
            return Err(Error::InvalidData(format!(
                "Volume dimensions {:?} contain no points",
                scalars.dim()
            )));
        }
        if spacing.iter().any(|s| !(*s > 0.0)) {
            return Err(Error::InvalidData(format!(
                "Volume spacing {:?} must be positive",
                spacing
            )));
        }
        Ok(Self {
            scalars,
            spacing,
            origin,
        })
    }

    /// Build a volume by evaluating `f(x, y, z)` at every grid index
    pub fn from_fn<F>(
        dimensions: [usize; 3],
        spacing: [f32; 3],
        origin: Point3f,
        f: F,
    ) -> Result<Self>
    where
        F: Fn(usize, usize, usize) -> f32,
    {
        let shape = (dimensions[0], dimensions[1], dimensions[2]);
        let scalars = Array3::from_shape_fn(shape, |(x, y, z)| f(x, y, z));
        Self::from_array(scalars, spacing, origin)
    }

    /// Grid dimensions along x, y and z
    pub fn dimensions(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.scalars.dim();
        [nx, ny, nz]
    }

    /// Total number of grid points
    pub fn number_of_points(&self) -> usize {
        self.scalars.len()
    }

    /// Physical size of each voxel
    pub fn spacing(&self) -> [f32; 3] {
        self.spacing
    }

    /// World position of grid index (0, 0, 0)
    pub fn origin(&self) -> Point3f {
        self.origin
    }

    /// The raw samples
    pub fn scalars(&self) -> &Array3<f32> {
        &self.scalars
    }

    /// Get scalar value at grid coordinates (with bounds checking)
    pub fn get_value(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        self.scalars.get((x, y, z)).copied()
    }

    /// Set scalar value at grid coordinates
    pub fn set_value(&mut self, x: usize, y: usize, z: usize, value: f32) -> Result<()> {
        let dimensions = self.dimensions();
        match self.scalars.get_mut((x, y, z)) {
            Some(v) => {
                *v = value;
                Ok(())
            }
            None => Err(Error::InvalidData(format!(
                "Grid coordinates ({}, {}, {}) out of bounds for dimensions {:?}",
                x, y, z, dimensions
            ))),
        }
    }

    /// Convert grid coordinates to world coordinates
    pub fn grid_to_world(&self, x: usize, y: usize, z: usize) -> Point3f {
        Point3f::new(
            self.origin.x + x as f32 * self.spacing[0],
            self.origin.y + y as f32 * self.spacing[1],
            self.origin.z + z as f32 * self.spacing[2],
        )
    }

    /// World-space bounds of the grid points
    pub fn bounds(&self) -> Bounds {
        let [nx, ny, nz] = self.dimensions();
        let max = self.grid_to_world(
            nx.saturating_sub(1),
            ny.saturating_sub(1),
            nz.saturating_sub(1),
        );
        Bounds::new(self.origin, max)
    }

    /// Minimum and maximum scalar value; `(0, 1)` for an empty volume
    pub fn scalar_range(&self) -> (f32, f32) {
        if self.scalars.is_empty() {
            return (0.0, 1.0);
        }
        self.scalars
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Extract the sub-volume between two inclusive grid corners.
    ///
    /// The requested extent is clamped to the volume, so callers may pass a
    /// maximum past the last index along axes they want whole.
    pub fn extract_voi(&self, min: [usize; 3], max: [usize; 3]) -> Result<ImageVolume> {
        let dimensions = self.dimensions();
        let mut lo = [0usize; 3];
        let mut hi = [0usize; 3];
        for i in 0..3 {
            if dimensions[i] == 0 || min[i] >= dimensions[i] {
                return Err(Error::InvalidData(format!(
                    "VOI start {:?} outside volume dimensions {:?}",
                    min, dimensions
                )));
            }
            lo[i] = min[i];
            hi[i] = max[i].min(dimensions[i] - 1);
            if hi[i] < lo[i] {
                return Err(Error::InvalidData(format!(
                    "Empty VOI {:?}..={:?}",
                    min, max
                )));
            }
        }

        let scalars = self
            .scalars
            .slice(s![lo[0]..=hi[0], lo[1]..=hi[1], lo[2]..=hi[2]])
            .to_owned();

        Ok(ImageVolume {
            scalars,
            spacing: self.spacing,
            origin: self.grid_to_world(lo[0], lo[1], lo[2]),
        })
    }

    /// Extract the single-sample-thick slice at `index` along `axis`
    pub fn extract_slice(&self, axis: Axis, index: usize) -> Result<ImageVolume> {
        let dimensions = self.dimensions();
        let a = axis.index();
        if index >= dimensions[a] {
            return Err(Error::InvalidData(format!(
                "Slice index {} out of range for axis {} with {} samples",
                index, axis, dimensions[a]
            )));
        }
        let mut min = [0usize; 3];
        let mut max = dimensions;
        min[a] = index;
        max[a] = index;
        self.extract_voi(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_volume() -> ImageVolume {
        ImageVolume::from_fn([4, 5, 6], [1.0, 2.0, 0.5], Point3f::new(1.0, 0.0, -1.0), |x, y, z| {
            (x + 10 * y + 100 * z) as f32
        })
        .unwrap()
    }

    #[test]
    fn test_volume_creation() {
        let volume = ImageVolume::new([10, 10, 10], [1.0, 1.0, 1.0], Point3f::origin());

        assert_eq!(volume.dimensions(), [10, 10, 10]);
        assert_eq!(volume.number_of_points(), 1000);
        assert_eq!(volume.spacing(), [1.0, 1.0, 1.0]);
        assert_eq!(volume.origin(), Point3f::origin());
    }

    #[test]
    fn test_rejects_empty_volume() {
        let result = ImageVolume::from_fn([4, 0, 4], [1.0; 3], Point3f::origin(), |_, _, _| 0.0);
        assert!(result.is_err());
        let spacing = [1.0, 0.0, 1.0];
        let result = ImageVolume::from_fn([4, 4, 4], spacing, Point3f::origin(), |_, _, _| 0.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_operations() {
        let mut volume = ImageVolume::new([3, 3, 3], [1.0, 1.0, 1.0], Point3f::origin());

        assert!(volume.set_value(1, 1, 1, 5.0).is_ok());
        assert_eq!(volume.get_value(1, 1, 1), Some(5.0));

        assert!(volume.set_value(3, 3, 3, 1.0).is_err());
        assert_eq!(volume.get_value(3, 3, 3), None);
    }

    #[test]
    fn test_bounds_and_range() {
        let volume = ramp_volume();
        let bounds = volume.bounds();
        assert_eq!(bounds.min, Point3f::new(1.0, 0.0, -1.0));
        assert_eq!(bounds.max, Point3f::new(4.0, 8.0, 1.5));
        assert_eq!(volume.scalar_range(), (0.0, 543.0));
    }

    #[test]
    fn test_extract_slice_keeps_world_position() {
        let volume = ramp_volume();
        let slice = volume.extract_slice(Axis::Y, 3).unwrap();

        assert_eq!(slice.dimensions(), [4, 1, 6]);
        assert_eq!(slice.origin(), volume.grid_to_world(0, 3, 0));
        assert_eq!(slice.get_value(2, 0, 4), volume.get_value(2, 3, 4));
    }

    #[test]
    fn test_extract_slice_out_of_range() {
        let volume = ramp_volume();
        assert!(volume.extract_slice(Axis::Z, 6).is_err());
        assert!(volume.extract_slice(Axis::X, 3).is_ok());
    }

    #[test]
    fn test_extract_voi_clamps_max() {
        let volume = ramp_volume();
        let voi = volume.extract_voi([1, 0, 2], [2, 100, 100]).unwrap();
        assert_eq!(voi.dimensions(), [2, 5, 4]);
        assert_eq!(voi.get_value(0, 0, 0), volume.get_value(1, 0, 2));
    }
}
