//! Tunables of the image widget

use serde::{Deserialize, Serialize};

/// Configuration for [`ImageWidget`](crate::ImageWidget)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageWidgetConfig {
    /// Volumes with this many points or more get no contour
    pub contour_point_limit: usize,
    pub contour_iso_value: f32,
    pub contour_color: [f32; 3],
    /// Contour alpha right after a volume is loaded
    pub initial_contour_alpha: f32,
    pub translucent_contour_alpha: f32,
    pub opaque_contour_alpha: f32,
    /// Length multiplier for pick rays
    pub pick_ray_extension: f64,
    /// Below this the projected motion counts as zero
    pub motion_epsilon: f64,
    /// Relative tolerance of the segment/triangle test
    pub pick_tolerance: f32,
    pub plane_bin: u32,
    pub geometry_bin: u32,
}

impl Default for ImageWidgetConfig {
    fn default() -> Self {
        Self {
            contour_point_limit: 600_000,
            contour_iso_value: 1400.0,
            contour_color: [0.8, 0.8, 0.8],
            initial_contour_alpha: 0.4,
            translucent_contour_alpha: 0.3,
            opaque_contour_alpha: 1.0,
            pick_ray_extension: 1000.0,
            motion_epsilon: 1e-6,
            pick_tolerance: 1e-6,
            plane_bin: 1,
            geometry_bin: 2,
        }
    }
}

impl ImageWidgetConfig {
    pub fn with_contour_point_limit(mut self, limit: usize) -> Self {
        self.contour_point_limit = limit;
        self
    }

    pub fn with_contour_iso_value(mut self, value: f32) -> Self {
        self.contour_iso_value = value;
        self
    }

    pub fn with_contour_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.contour_color = [r, g, b];
        self
    }

    pub fn with_pick_ray_extension(mut self, extension: f64) -> Self {
        self.pick_ray_extension = extension;
        self
    }

    pub fn with_bins(mut self, plane_bin: u32, geometry_bin: u32) -> Self {
        self.plane_bin = plane_bin;
        self.geometry_bin = geometry_bin;
        self
    }
}
