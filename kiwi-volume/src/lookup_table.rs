//! Scalar to color lookup tables

use serde::{Deserialize, Serialize};

/// Number of entries in the tables built here
pub const DEFAULT_NUMBER_OF_COLORS: usize = 256;

/// Maps scalar values in a range onto a fixed table of RGBA colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    range: (f32, f32),
    table: Vec<[u8; 4]>,
}

impl LookupTable {
    /// Opaque black-to-white ramp over `range`
    pub fn grayscale(range: (f32, f32)) -> Self {
        let n = DEFAULT_NUMBER_OF_COLORS;
        let table = (0..n)
            .map(|i| {
                let v = ((i as f32 / (n - 1) as f32) * 255.0).round() as u8;
                [v, v, v, 255]
            })
            .collect();
        Self { range, table }
    }

    /// Scalar range mapped onto the first and last entry
    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Number of table entries
    pub fn number_of_colors(&self) -> usize {
        self.table.len()
    }

    /// Table index for a scalar; values outside the range clamp to the ends
    pub fn index_of(&self, value: f32) -> usize {
        let (lo, hi) = self.range;
        let last = self.table.len().saturating_sub(1);
        if !(hi > lo) || value.is_nan() {
            return 0;
        }
        let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        ((t * self.table.len() as f32) as usize).min(last)
    }

    /// Color for a single scalar
    pub fn map_value(&self, value: f32) -> [u8; 4] {
        self.table
            .get(self.index_of(value))
            .copied()
            .unwrap_or([0, 0, 0, 255])
    }

    /// Colors for a run of scalars
    pub fn map_scalars<'a, I>(&self, values: I) -> Vec<[u8; 4]>
    where
        I: IntoIterator<Item = &'a f32>,
    {
        values.into_iter().map(|v| self.map_value(*v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_endpoints() {
        let lut = LookupTable::grayscale((0.0, 3000.0));
        assert_eq!(lut.number_of_colors(), 256);
        assert_eq!(lut.map_value(0.0), [0, 0, 0, 255]);
        assert_eq!(lut.map_value(3000.0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let lut = LookupTable::grayscale((10.0, 20.0));
        assert_eq!(lut.map_value(-100.0), lut.map_value(10.0));
        assert_eq!(lut.map_value(1e9), lut.map_value(20.0));
    }

    #[test]
    fn test_monotonic() {
        let lut = LookupTable::grayscale((0.0, 1.0));
        let colors = lut.map_scalars(&[0.1, 0.4, 0.6, 0.9]);
        assert!(colors.windows(2).all(|w| w[0][0] <= w[1][0]));
    }

    #[test]
    fn test_degenerate_range() {
        let lut = LookupTable::grayscale((5.0, 5.0));
        assert_eq!(lut.index_of(5.0), 0);
    }
}
