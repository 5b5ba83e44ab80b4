//! Representation of plain polygonal geometry

use crate::actor::{Actor, ActorRef};
use crate::renderer::Renderer;
use crate::representation::Representation;
use crate::shaders::ShaderProgram;
use kiwi_core::{Color4f, PolyMesh};
use std::rc::Rc;

/// Draws a [`PolyMesh`] with a single color
#[derive(Debug)]
pub struct PolyDataRepresentation {
    actor: ActorRef,
}

impl PolyDataRepresentation {
    pub fn new(shader: Rc<ShaderProgram>) -> Self {
        Self {
            actor: Actor::new(shader).into_shared(),
        }
    }

    /// Replace the displayed geometry
    pub fn set_poly_data(&mut self, mesh: PolyMesh) {
        self.actor.borrow_mut().mapper.geometry = mesh;
    }

    /// Copy of the displayed geometry
    pub fn poly_data(&self) -> PolyMesh {
        self.actor.borrow().mapper.geometry.clone()
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.actor.borrow_mut().mapper.set_color(r, g, b, a);
    }

    pub fn color(&self) -> Color4f {
        self.actor.borrow().mapper.color
    }

    pub fn set_bin_number(&mut self, bin: u32) {
        self.actor.borrow_mut().bin_number = bin;
    }

    pub fn actor(&self) -> &ActorRef {
        &self.actor
    }
}

impl Representation for PolyDataRepresentation {
    fn add_self_to_renderer(&mut self, renderer: &mut Renderer) {
        renderer.add_actor(self.actor.clone());
    }

    fn remove_self_from_renderer(&mut self, renderer: &mut Renderer) {
        renderer.remove_actor(&self.actor);
    }

    fn number_of_facets(&self) -> usize {
        self.actor.borrow().mapper.geometry.triangle_count()
    }

    fn number_of_vertices(&self) -> usize {
        self.actor.borrow().mapper.geometry.point_count()
    }

    fn number_of_lines(&self) -> usize {
        self.actor.borrow().mapper.geometry.line_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiwi_core::{Bounds, Point3f};

    #[test]
    fn test_stats_follow_geometry() {
        let mut rep = PolyDataRepresentation::new(Rc::new(ShaderProgram::surface()));
        assert_eq!(rep.number_of_lines(), 0);

        let bounds = Bounds::new(Point3f::origin(), Point3f::new(1.0, 2.0, 3.0));
        rep.set_poly_data(kiwi_volume::outline(&bounds));
        assert_eq!(rep.number_of_vertices(), 8);
        assert_eq!(rep.number_of_lines(), 12);
        assert_eq!(rep.number_of_facets(), 0);
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut renderer = Renderer::default();
        let mut rep = PolyDataRepresentation::new(Rc::new(ShaderProgram::surface()));
        rep.set_color(0.8, 0.8, 0.8, 0.4);

        rep.add_self_to_renderer(&mut renderer);
        rep.add_self_to_renderer(&mut renderer);
        assert_eq!(renderer.actors().len(), 1);
        assert!(rep.actor().borrow().mapper.is_translucent());

        rep.remove_self_from_renderer(&mut renderer);
        rep.remove_self_from_renderer(&mut renderer);
        assert!(renderer.actors().is_empty());
    }
}
