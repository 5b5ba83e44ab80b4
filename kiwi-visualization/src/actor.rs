//! Actors and mappers: what a renderer draws

use crate::shaders::ShaderProgram;
use kiwi_core::{Color4f, PolyMesh};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to an actor, held by its representation and by the renderer
pub type ActorRef = Rc<RefCell<Actor>>;

/// RGBA8 image applied to textured geometry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    /// Row-major pixels, `width * height` entries, row 0 at the bottom
    pub pixels: Vec<[u8; 4]>,
}

impl Texture {
    /// Pixel at column `i`, row `j`
    pub fn pixel(&self, i: usize, j: usize) -> Option<[u8; 4]> {
        if i >= self.width || j >= self.height {
            return None;
        }
        self.pixels.get(j * self.width + i).copied()
    }
}

/// Geometry plus the state needed to draw it
#[derive(Debug, Clone)]
pub struct Mapper {
    pub geometry: PolyMesh,
    pub color: Color4f,
    pub texture: Option<Texture>,
    pub shader: Rc<ShaderProgram>,
}

impl Mapper {
    pub fn new(shader: Rc<ShaderProgram>) -> Self {
        Self {
            geometry: PolyMesh::new(),
            color: Color4f::new(1.0, 1.0, 1.0, 1.0),
            texture: None,
            shader,
        }
    }

    pub fn set_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.color = Color4f::new(r, g, b, a);
    }

    /// Whether the mapper needs blending
    pub fn is_translucent(&self) -> bool {
        self.color.w < 1.0
    }
}

/// A drawable scene node
///
/// Actors with a lower bin number are drawn first.
#[derive(Debug, Clone)]
pub struct Actor {
    pub mapper: Mapper,
    pub bin_number: u32,
    pub visible: bool,
}

impl Actor {
    pub fn new(shader: Rc<ShaderProgram>) -> Self {
        Self {
            mapper: Mapper::new(shader),
            bin_number: 0,
            visible: true,
        }
    }

    pub fn into_shared(self) -> ActorRef {
        Rc::new(RefCell::new(self))
    }
}
