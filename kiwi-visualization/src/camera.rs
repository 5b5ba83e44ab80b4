//! Camera utilities for 3D visualization

use kiwi_core::{Point3f, Vector3f};
use nalgebra::{Matrix4, Perspective3, Point3, Rotation3, Unit, Vector3};

/// A perspective camera looking from `position` at `focal_point`
///
/// The view angle is the full vertical field of view in degrees. View and
/// projection matrices are produced in double precision so that
/// world/display round trips stay well below picking tolerances.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3f,
    pub focal_point: Point3f,
    pub view_up: Vector3f,
    pub view_angle: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3f,
        focal_point: Point3f,
        view_up: Vector3f,
        view_angle: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            focal_point,
            view_up,
            view_angle,
            near,
            far,
        }
    }

    /// Distance from the position to the focal point
    pub fn distance(&self) -> f32 {
        (self.focal_point - self.position).norm()
    }

    /// Unit vector from the position towards the focal point
    pub fn direction_of_projection(&self) -> Vector3f {
        (self.focal_point - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -Vector3f::z())
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(
            &self.position.cast::<f64>(),
            &self.focal_point.cast::<f64>(),
            &self.view_up.cast::<f64>(),
        )
    }

    /// Get the projection matrix for a viewport aspect ratio (width / height)
    pub fn projection_matrix(&self, aspect_ratio: f64) -> Matrix4<f64> {
        let fovy = f64::from(self.view_angle).to_radians();
        let perspective =
            Perspective3::new(aspect_ratio, fovy, f64::from(self.near), f64::from(self.far));
        perspective.into_inner()
    }

    /// Move the position towards the focal point, dividing the distance by `factor`
    pub fn dolly(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let offset = self.position - self.focal_point;
        self.position = self.focal_point + offset / factor;
    }

    /// Rotate the position about the view-up vector through the focal point
    pub fn azimuth(&mut self, degrees: f32) {
        self.rotate_about(self.view_up, degrees);
    }

    /// Rotate the position about the horizontal screen axis through the focal point
    pub fn elevation(&mut self, degrees: f32) {
        let right = self.direction_of_projection().cross(&self.view_up);
        self.rotate_about(right, -degrees);
        self.orthogonalize_view_up();
    }

    /// Make the view-up vector perpendicular to the direction of projection
    pub fn orthogonalize_view_up(&mut self) {
        let dop = self.direction_of_projection();
        let right = dop.cross(&self.view_up);
        if let Some(up) = right.cross(&dop).try_normalize(f32::EPSILON) {
            self.view_up = up;
        }
    }

    fn rotate_about(&mut self, axis: Vector3f, degrees: f32) {
        let Some(axis) = Unit::try_new(axis.cast::<f64>(), f64::EPSILON) else {
            return;
        };
        let rotation = Rotation3::from_axis_angle(&axis, f64::from(degrees).to_radians());
        let focal: Point3<f64> = self.focal_point.cast();
        let offset: Vector3<f64> = self.position.cast::<f64>() - focal;
        self.position = (focal + rotation * offset).cast();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3f::new(0.0, 0.0, 1.0),
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            30.0,
            0.01,
            1000.01,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = Camera::default();
        assert_eq!(camera.direction_of_projection(), Vector3f::new(0.0, 0.0, -1.0));
        assert_relative_eq!(camera.distance(), 1.0);
    }

    #[test]
    fn test_dolly() {
        let mut camera = Camera::default();
        camera.position = Point3f::new(0.0, 0.0, 10.0);
        camera.dolly(2.0);
        assert_relative_eq!(camera.distance(), 5.0);
        camera.dolly(0.0);
        assert_relative_eq!(camera.distance(), 5.0);
    }

    #[test]
    fn test_azimuth_keeps_distance() {
        let mut camera = Camera::default();
        camera.position = Point3f::new(0.0, 0.0, 4.0);
        camera.azimuth(90.0);
        assert_relative_eq!(camera.distance(), 4.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_elevation_keeps_view_up_orthogonal() {
        let mut camera = Camera::default();
        camera.position = Point3f::new(0.0, 0.0, 4.0);
        camera.elevation(30.0);
        assert_relative_eq!(camera.distance(), 4.0, epsilon = 1e-5);
        assert!(camera.position.y > 0.0);
        let up_dot_view = camera.view_up.dot(&camera.direction_of_projection());
        assert_relative_eq!(up_dot_view, 0.0, epsilon = 1e-5);
    }
}
