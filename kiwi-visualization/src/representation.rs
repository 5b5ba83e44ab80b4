//! Common interface of everything a widget can place in a renderer

use crate::renderer::Renderer;

/// A renderable piece of a scene
///
/// Attaching and detaching are idempotent. The statistics count the geometry
/// held by the representation whether or not it is attached.
pub trait Representation {
    fn add_self_to_renderer(&mut self, renderer: &mut Renderer);

    fn remove_self_from_renderer(&mut self, renderer: &mut Renderer);

    fn number_of_facets(&self) -> usize;

    fn number_of_vertices(&self) -> usize;

    fn number_of_lines(&self) -> usize;
}
