//! Textured quad showing one slice of a volume

use crate::actor::{Actor, ActorRef, Texture};
use crate::renderer::Renderer;
use crate::representation::Representation;
use crate::shaders::ShaderProgram;
use kiwi_core::{Axis, Error, Point3f, PolyMesh, Result};
use kiwi_volume::{ImageVolume, LookupTable};
use std::rc::Rc;

/// Draws a single-sample-thick volume slice as a textured quad
///
/// The quad spans the slice bounds. Texture rows run along the second
/// in-plane axis, columns along the first, in ascending axis order.
#[derive(Debug)]
pub struct ImagePlaneRepresentation {
    actor: ActorRef,
    color_map: Option<LookupTable>,
    normal_axis: Option<Axis>,
}

/// The two axes spanning the plane normal to `axis`, in ascending order
pub fn in_plane_axes(axis: Axis) -> (Axis, Axis) {
    match axis {
        Axis::X => (Axis::Y, Axis::Z),
        Axis::Y => (Axis::X, Axis::Z),
        Axis::Z => (Axis::X, Axis::Y),
    }
}

impl ImagePlaneRepresentation {
    pub fn new(shader: Rc<ShaderProgram>) -> Self {
        Self {
            actor: Actor::new(shader).into_shared(),
            color_map: None,
            normal_axis: None,
        }
    }

    /// Color map used for the next [`set_image_data`](Self::set_image_data)
    pub fn set_color_map(&mut self, table: LookupTable) {
        self.color_map = Some(table);
    }

    pub fn color_map(&self) -> Option<&LookupTable> {
        self.color_map.as_ref()
    }

    pub fn set_bin_number(&mut self, bin: u32) {
        self.actor.borrow_mut().bin_number = bin;
    }

    /// Axis normal to the currently displayed slice
    pub fn normal_axis(&self) -> Option<Axis> {
        self.normal_axis
    }

    /// Rebuild the quad and texture from a slice normal to `axis`
    ///
    /// Fails unless `slice` has exactly one sample along `axis`. Without a
    /// color map a grayscale ramp over the slice's own range is used.
    pub fn set_image_data(&mut self, slice: &ImageVolume, axis: Axis) -> Result<()> {
        let dimensions = slice.dimensions();
        if dimensions[axis.index()] != 1 {
            return Err(Error::InvalidData(format!(
                "Image plane normal to {} needs a single sample along it, got dimensions {:?}",
                axis, dimensions
            )));
        }
        let (u, v) = in_plane_axes(axis);
        let bounds = slice.bounds();

        let corner = |a: f32, b: f32| {
            let mut p = bounds.min;
            p[u.index()] = a;
            p[v.index()] = b;
            p
        };
        let (u_lo, u_hi) = (bounds.min[u.index()], bounds.max[u.index()]);
        let (v_lo, v_hi) = (bounds.min[v.index()], bounds.max[v.index()]);
        let points: Vec<Point3f> = vec![
            corner(u_lo, v_lo),
            corner(u_hi, v_lo),
            corner(u_hi, v_hi),
            corner(u_lo, v_hi),
        ];
        let mut quad = PolyMesh::from_triangles(points, vec![[0, 1, 2], [0, 2, 3]]);
        quad.set_tcoords(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);

        let fallback;
        let table = match &self.color_map {
            Some(table) => table,
            None => {
                fallback = LookupTable::grayscale(slice.scalar_range());
                &fallback
            }
        };

        let (width, height) = (dimensions[u.index()], dimensions[v.index()]);
        let mut pixels = Vec::with_capacity(width * height);
        for j in 0..height {
            for i in 0..width {
                let mut index = [0usize; 3];
                index[u.index()] = i;
                index[v.index()] = j;
                let value = slice.get_value(index[0], index[1], index[2]).unwrap_or(0.0);
                pixels.push(table.map_value(value));
            }
        }

        let mut actor = self.actor.borrow_mut();
        actor.mapper.geometry = quad;
        actor.mapper.texture = Some(Texture {
            width,
            height,
            pixels,
        });
        self.normal_axis = Some(axis);

        tracing::trace!(%axis, width, height, "updated image plane");
        Ok(())
    }

    /// Copy of the quad geometry, used to build pick geometry
    pub fn image_plane_poly_data(&self) -> PolyMesh {
        self.actor.borrow().mapper.geometry.clone()
    }

    /// Copy of the current texture
    pub fn texture(&self) -> Option<Texture> {
        self.actor.borrow().mapper.texture.clone()
    }

    pub fn actor(&self) -> &ActorRef {
        &self.actor
    }
}

impl Representation for ImagePlaneRepresentation {
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
    use approx::assert_relative_eq;

    fn ramp() -> ImageVolume {
        ImageVolume::from_fn([4, 3, 5], [1.0, 2.0, 0.5], Point3f::origin(), |x, y, z| {
            (x + 4 * y + 12 * z) as f32
        })
        .unwrap()
    }

    fn plane() -> ImagePlaneRepresentation {
        ImagePlaneRepresentation::new(Rc::new(ShaderProgram::textured_plane()))
    }

    #[test]
    fn test_quad_spans_slice_bounds() {
        let volume = ramp();
        let slice = volume.extract_slice(Axis::Y, 2).unwrap();
        let mut rep = plane();
        rep.set_image_data(&slice, Axis::Y).unwrap();

        let quad = rep.image_plane_poly_data();
        assert_eq!(quad.point_count(), 4);
        assert_eq!(quad.triangle_count(), 2);
        for p in &quad.points {
            assert_relative_eq!(p.y, 4.0);
        }
        assert_relative_eq!(quad.points[2], Point3f::new(3.0, 4.0, 2.0));
        assert_eq!(rep.normal_axis(), Some(Axis::Y));
    }

    #[test]
    fn test_texture_follows_color_map() {
        let volume = ramp();
        let mut rep = plane();
        rep.set_color_map(LookupTable::grayscale(volume.scalar_range()));
        let slice = volume.extract_slice(Axis::Z, 0).unwrap();
        rep.set_image_data(&slice, Axis::Z).unwrap();

        let texture = rep.texture().unwrap();
        assert_eq!((texture.width, texture.height), (4, 3));
        assert_eq!(texture.pixel(0, 0), Some([0, 0, 0, 255]));
        let brighter = texture.pixel(3, 2).unwrap();
        assert!(brighter[0] > 0);
    }

    #[test]
    fn test_axis_comes_from_caller_on_thin_volume() {
        // Already one sample thick along y; the z slice must still be a z plane
        let volume = ImageVolume::from_fn([4, 1, 5], [1.0; 3], Point3f::origin(), |x, _, z| {
            (x + 4 * z) as f32
        })
        .unwrap();
        let slice = volume.extract_slice(Axis::Z, 3).unwrap();
        let mut rep = plane();
        rep.set_image_data(&slice, Axis::Z).unwrap();

        assert_eq!(rep.normal_axis(), Some(Axis::Z));
        let texture = rep.texture().unwrap();
        assert_eq!((texture.width, texture.height), (4, 1));
        for p in &rep.image_plane_poly_data().points {
            assert_relative_eq!(p.z, 3.0);
        }
    }

    #[test]
    fn test_rejects_full_volume() {
        let mut rep = plane();
        assert!(rep.set_image_data(&ramp(), Axis::X).is_err());
        assert_eq!(rep.number_of_facets(), 0);
    }
}
