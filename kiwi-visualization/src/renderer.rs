//! Renderer: viewport, camera and the list of attached actors

use crate::actor::ActorRef;
use crate::camera::Camera;
use kiwi_core::{Bounds, Color4f, Drawable, Error, Point3d, Result};
use nalgebra::{Matrix4, Vector4};
use std::rc::Rc;

/// Background fill behind the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Solid(Color4f),
    /// Vertical gradient from `bottom` to `top`
    Gradient { bottom: Color4f, top: Color4f },
}

/// Pixel rectangle of a viewport inside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Holds the camera and the actors of one viewport
///
/// Display coordinates have their origin at the lower-left corner of the
/// viewport, x to the right and y up. The display z is the normalized device
/// depth in `[-1, 1]`.
#[derive(Debug)]
pub struct Renderer {
    camera: Camera,
    view_rect: ViewRect,
    background: Background,
    actors: Vec<ActorRef>,
}

impl Renderer {
    /// Create a renderer covering a `width` x `height` viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::default(),
            view_rect: ViewRect {
                x: 0,
                y: 0,
                width: width.max(1),
                height: height.max(1),
            },
            background: Background::Solid(Color4f::new(0.0, 0.0, 0.0, 1.0)),
            actors: Vec::new(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Resize the viewport, keeping its offset
    pub fn resize(&mut self, width: u32, height: u32) {
        self.view_rect.width = width.max(1);
        self.view_rect.height = height.max(1);
    }

    /// Place the viewport inside a larger window
    pub fn set_view_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.view_rect = ViewRect {
            x,
            y,
            width: width.max(1),
            height: height.max(1),
        };
    }

    pub fn view_rect(&self) -> ViewRect {
        self.view_rect
    }

    /// Viewport width in pixels
    pub fn width(&self) -> u32 {
        self.view_rect.width
    }

    /// Viewport height in pixels
    pub fn height(&self) -> u32 {
        self.view_rect.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.view_rect.width) / f64::from(self.view_rect.height)
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn set_background_color(&mut self, r: f32, g: f32, b: f32) {
        self.background = Background::Solid(Color4f::new(r, g, b, 1.0));
    }

    pub fn set_gradient_background(&mut self, bottom: Color4f, top: Color4f) {
        self.background = Background::Gradient { bottom, top };
    }

    fn world_to_clip(&self) -> Matrix4<f64> {
        self.camera.projection_matrix(self.aspect_ratio()) * self.camera.view_matrix()
    }

    /// Project a world point to display coordinates
    pub fn world_to_display(&self, world: &Point3d) -> Option<Point3d> {
        let clip = self.world_to_clip() * world.to_homogeneous();
        if clip.w.abs() < f64::EPSILON {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some(Point3d::new(
            (ndc.x + 1.0) * 0.5 * f64::from(self.width()),
            (ndc.y + 1.0) * 0.5 * f64::from(self.height()),
            ndc.z,
        ))
    }

    /// Un-project a display point (with normalized depth) back to world space
    pub fn display_to_world(&self, display: &Point3d) -> Option<Point3d> {
        let inverse = self.world_to_clip().try_inverse()?;
        let ndc = Vector4::new(
            2.0 * display.x / f64::from(self.width()) - 1.0,
            2.0 * display.y / f64::from(self.height()) - 1.0,
            display.z,
            1.0,
        );
        let world = inverse * ndc;
        if world.w.abs() < f64::EPSILON {
            return None;
        }
        Some(Point3d::from(world.xyz() / world.w))
    }

    /// Fit the camera to `bounds`, keeping its viewing direction and view-up
    pub fn reset_camera(&mut self, bounds: &Bounds) {
        let center = bounds.center();
        let mut radius = bounds.diagonal_length() * 0.5;
        if radius <= 0.0 {
            radius = 0.5;
        }

        let half_angle = (self.camera.view_angle.to_radians() * 0.5).max(f32::EPSILON);
        let distance = radius / half_angle.sin();
        let dop = self.camera.direction_of_projection();

        self.camera.focal_point = center;
        self.camera.position = center - dop * distance;
        self.camera.orthogonalize_view_up();
        self.reset_camera_clipping_range(bounds);

        tracing::debug!(distance, radius, "reset camera");
    }

    /// Bounds of the geometry of all visible actors
    pub fn visible_bounds(&self) -> Option<Bounds> {
        self.actors
            .iter()
            .filter_map(|a| {
                let actor = a.borrow();
                if actor.visible {
                    actor.mapper.geometry.bounding_box()
                } else {
                    None
                }
            })
            .reduce(|mut acc, b| {
                acc.expand(&b.min);
                acc.expand(&b.max);
                acc
            })
    }

    /// Fit the camera to everything currently visible
    pub fn reset_camera_to_scene(&mut self) -> Result<()> {
        let bounds = self
            .visible_bounds()
            .ok_or_else(|| {
                Error::Visualization("No visible geometry to fit the camera to".to_string())
            })?;
        self.reset_camera(&bounds);
        Ok(())
    }

    /// Fit the near and far planes around `bounds`
    pub fn reset_camera_clipping_range(&mut self, bounds: &Bounds) {
        let radius = (bounds.diagonal_length() * 0.5).max(0.5);
        let distance = self.camera.distance();
        let far = distance + radius * 1.01;
        let near = (distance - radius * 1.01).max(0.001 * far);
        self.camera.near = near;
        self.camera.far = far;
    }

    /// Attach an actor; attaching the same actor twice is a no-op
    pub fn add_actor(&mut self, actor: ActorRef) {
        if !self.has_actor(&actor) {
            self.actors.push(actor);
        }
    }

    /// Detach an actor if it is attached
    pub fn remove_actor(&mut self, actor: &ActorRef) {
        self.actors.retain(|a| !Rc::ptr_eq(a, actor));
    }

    pub fn has_actor(&self, actor: &ActorRef) -> bool {
        self.actors.iter().any(|a| Rc::ptr_eq(a, actor))
    }

    pub fn actors(&self) -> &[ActorRef] {
        &self.actors
    }

    /// Visible actors in draw order: ascending bin, then attach order
    pub fn render_order(&self) -> Vec<ActorRef> {
        let mut visible: Vec<ActorRef> = self
            .actors
            .iter()
            .filter(|a| a.borrow().visible)
            .cloned()
            .collect();
        visible.sort_by_key(|a| a.borrow().bin_number);
        visible
    }

    /// Triangles over visible actors
    pub fn number_of_facets(&self) -> usize {
        self.sum_visible(|a| a.mapper.geometry.triangle_count())
    }

    /// Points over visible actors
    pub fn number_of_vertices(&self) -> usize {
        self.sum_visible(|a| a.mapper.geometry.point_count())
    }

    /// Line segments over visible actors
    pub fn number_of_lines(&self) -> usize {
        self.sum_visible(|a| a.mapper.geometry.line_count())
    }

    fn sum_visible<F>(&self, count: F) -> usize
    where
        F: Fn(&crate::actor::Actor) -> usize,
    {
        self.actors
            .iter()
            .map(|a| a.borrow())
            .filter(|a| a.visible)
            .map(|a| count(&a))
            .sum()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(300, 300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::shaders::ShaderProgram;
    use approx::assert_relative_eq;
    use kiwi_core::{Point3f, PolyMesh, Vector3f};

    fn fitted_renderer() -> Renderer {
        let mut renderer = Renderer::new(640, 480);
        let bounds = Bounds::new(Point3f::origin(), Point3f::new(10.0, 10.0, 10.0));
        renderer.reset_camera(&bounds);
        renderer
    }

    #[test]
    fn test_focal_point_projects_to_viewport_center() {
        let renderer = fitted_renderer();
        let focal = renderer.camera().focal_point.cast::<f64>();
        let display = renderer.world_to_display(&focal).unwrap();
        assert_relative_eq!(display.x, 320.0, epsilon = 1e-6);
        assert_relative_eq!(display.y, 240.0, epsilon = 1e-6);
        assert!(display.z > -1.0 && display.z < 1.0);
    }

    #[test]
    fn test_display_world_round_trip() {
        let renderer = fitted_renderer();
        let world = Point3d::new(2.0, 7.5, 3.0);
        let display = renderer.world_to_display(&world).unwrap();
        let back = renderer.display_to_world(&display).unwrap();
        assert_relative_eq!(back, world, epsilon = 1e-6);
    }

    #[test]
    fn test_display_y_grows_upward() {
        let renderer = fitted_renderer();
        let low = renderer.world_to_display(&Point3d::new(5.0, 1.0, 5.0)).unwrap();
        let high = renderer.world_to_display(&Point3d::new(5.0, 9.0, 5.0)).unwrap();
        assert!(high.y > low.y);
    }

    #[test]
    fn test_reset_camera_keeps_direction() {
        let mut renderer = Renderer::new(100, 100);
        renderer.camera_mut().position = Point3f::new(5.0, 0.0, 0.0);
        let bounds = Bounds::new(Point3f::origin(), Point3f::new(2.0, 2.0, 2.0));
        renderer.reset_camera(&bounds);

        let camera = renderer.camera();
        assert_eq!(camera.focal_point, Point3f::new(1.0, 1.0, 1.0));
        assert_relative_eq!(
            camera.direction_of_projection(),
            Vector3f::new(-1.0, 0.0, 0.0),
            epsilon = 1e-6
        );
        assert!(camera.near < camera.distance() - 3.0_f32.sqrt());
        assert!(camera.far > camera.distance() + 3.0_f32.sqrt());
    }

    #[test]
    fn test_actor_registry_is_idempotent() {
        let mut renderer = Renderer::default();
        let actor = Actor::new(Rc::new(ShaderProgram::surface())).into_shared();
        actor.borrow_mut().mapper.geometry = PolyMesh::from_triangles(
            vec![Point3f::origin(), Point3f::new(1.0, 0.0, 0.0), Point3f::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2]],
        );

        renderer.add_actor(actor.clone());
        renderer.add_actor(actor.clone());
        assert_eq!(renderer.actors().len(), 1);
        assert_eq!(renderer.number_of_facets(), 1);
        assert_eq!(renderer.number_of_vertices(), 3);

        renderer.remove_actor(&actor);
        renderer.remove_actor(&actor);
        assert!(renderer.actors().is_empty());
    }

    #[test]
    fn test_render_order_sorts_by_bin() {
        let mut renderer = Renderer::default();
        let shader = Rc::new(ShaderProgram::surface());
        let late = Actor::new(shader.clone()).into_shared();
        late.borrow_mut().bin_number = 2;
        let early = Actor::new(shader.clone()).into_shared();
        early.borrow_mut().bin_number = 1;
        let hidden = Actor::new(shader).into_shared();
        hidden.borrow_mut().visible = false;

        renderer.add_actor(late.clone());
        renderer.add_actor(hidden);
        renderer.add_actor(early.clone());

        let order = renderer.render_order();
        assert_eq!(order.len(), 2);
        assert!(Rc::ptr_eq(&order[0], &early));
        assert!(Rc::ptr_eq(&order[1], &late));
    }

    #[test]
    fn test_reset_camera_to_scene() {
        let mut renderer = Renderer::default();
        assert!(renderer.reset_camera_to_scene().is_err());

        let shader = Rc::new(ShaderProgram::surface());
        for offset in [0.0, 4.0] {
            let actor = Actor::new(shader.clone()).into_shared();
            actor.borrow_mut().mapper.geometry = PolyMesh::from_lines(
                vec![Point3f::new(offset, 0.0, 0.0), Point3f::new(offset, 2.0, 2.0)],
                vec![[0, 1]],
            );
            renderer.add_actor(actor);
        }

        let bounds = renderer.visible_bounds().unwrap();
        assert_eq!(bounds.max, Point3f::new(4.0, 2.0, 2.0));
        renderer.reset_camera_to_scene().unwrap();
        assert_eq!(renderer.camera().focal_point, Point3f::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_view_rect_and_background() {
        let mut renderer = Renderer::new(800, 600);
        renderer.set_view_rect(500, 0, 300, 600);
        assert_eq!(renderer.width(), 300);
        assert_relative_eq!(renderer.aspect_ratio(), 0.5);

        renderer.set_background_color(0.8, 0.6, 0.6);
        assert_eq!(renderer.background(), Background::Solid(Color4f::new(0.8, 0.6, 0.6, 1.0)));
    }
}
