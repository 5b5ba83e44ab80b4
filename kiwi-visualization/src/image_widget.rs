//! Interactive widget showing three orthogonal slices of a volume
//!
//! The widget composes five representations: one textured plane per axis, an
//! isosurface contour and the bounding outline of the volume. A touch that
//! lands on one of the planes selects its axis; subsequent pan gestures move
//! that plane through the volume. A double tap cycles the contour between
//! hidden, translucent and opaque.

use crate::config::ImageWidgetConfig;
use crate::image_plane::ImagePlaneRepresentation;
use crate::interaction::GestureHandler;
use crate::poly_data::PolyDataRepresentation;
use crate::renderer::Renderer;
use crate::representation::Representation;
use crate::shaders::ShaderProgram;
use kiwi_algorithms::{AppendPolyData, AppendedPolyData, CellLocator};
use kiwi_core::{Axis, Error, Point3d, Point3f, PolyMesh, Result};
use kiwi_volume::{contour, volume_outline, ImageVolume, LookupTable};
use std::rc::Rc;
use std::sync::Arc;

/// Display state of the contour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContourVisibility {
    Hidden,
    Translucent,
    Opaque,
}

impl ContourVisibility {
    /// State reached by one double tap
    pub fn next(self) -> Self {
        match self {
            ContourVisibility::Hidden => ContourVisibility::Translucent,
            ContourVisibility::Translucent => ContourVisibility::Opaque,
            ContourVisibility::Opaque => ContourVisibility::Hidden,
        }
    }
}

/// Result of the last successful pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    pub axis: Axis,
    pub point: Point3f,
    /// Parameter along the pick segment
    pub t: f32,
}

/// Union of the three plane quads plus the locator built over it
struct PickGeometry {
    append: AppendPolyData<Axis>,
    merged: AppendedPolyData<Axis>,
    locator: CellLocator,
    dirty: bool,
}

impl PickGeometry {
    fn new() -> Self {
        let mut append = AppendPolyData::new();
        for axis in Axis::ALL {
            append.add_input(axis, PolyMesh::new());
        }
        let merged = append.update();
        Self {
            locator: CellLocator::build(&merged.mesh),
            append,
            merged,
            dirty: true,
        }
    }

    fn set_plane(&mut self, axis: Axis, quad: PolyMesh) -> Result<()> {
        self.append.set_input(axis.index(), quad)?;
        self.dirty = true;
        Ok(())
    }

    fn rebuild_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        self.merged = self.append.update();
        self.locator = CellLocator::build(&self.merged.mesh);
        self.dirty = false;
        tracing::trace!(cells = self.locator.number_of_cells(), "rebuilt pick geometry");
    }

    fn pick(&mut self, p0: &Point3f, p1: &Point3f, tolerance: f32) -> Option<PickResult> {
        self.rebuild_if_dirty();
        let hit = self.locator.intersect_with_line(p0, p1, tolerance)?;
        let axis = self.merged.tag_of_cell(hit.cell_id)?;
        Some(PickResult {
            axis,
            point: hit.point,
            t: hit.t,
        })
    }
}

/// Three slice planes, a contour and an outline driven by touch gestures
pub struct ImageWidget {
    config: ImageWidgetConfig,
    image: Option<Arc<ImageVolume>>,
    slice_reps: [ImagePlaneRepresentation; 3],
    contour_rep: PolyDataRepresentation,
    outline_rep: PolyDataRepresentation,
    slice_indices: [usize; 3],
    selected_axis: Option<Axis>,
    contour_visibility: ContourVisibility,
    pick_geometry: PickGeometry,
    last_pick: Option<PickResult>,
    attached: bool,
}

impl ImageWidget {
    /// Create the widget and its representations
    ///
    /// Planes are drawn with `plane_shader`; contour and outline with
    /// `surface_shader`.
    pub fn initialize_with_shader(
        surface_shader: Rc<ShaderProgram>,
        plane_shader: Rc<ShaderProgram>,
        config: ImageWidgetConfig,
    ) -> Self {
        let slice_reps = [(); 3].map(|_| {
            let mut rep = ImagePlaneRepresentation::new(plane_shader.clone());
            rep.set_bin_number(config.plane_bin);
            rep
        });

        let mut contour_rep = PolyDataRepresentation::new(surface_shader.clone());
        contour_rep.set_bin_number(config.geometry_bin);
        let mut outline_rep = PolyDataRepresentation::new(surface_shader);
        outline_rep.set_bin_number(config.geometry_bin);

        Self {
            config,
            image: None,
            slice_reps,
            contour_rep,
            outline_rep,
            slice_indices: [0; 3],
            selected_axis: None,
            contour_visibility: ContourVisibility::Hidden,
            pick_geometry: PickGeometry::new(),
            last_pick: None,
            attached: false,
        }
    }

    /// Widget with the built-in shaders and default configuration
    pub fn new() -> Self {
        Self::initialize_with_shader(
            Rc::new(ShaderProgram::surface()),
            Rc::new(ShaderProgram::textured_plane()),
            ImageWidgetConfig::default(),
        )
    }

    pub fn config(&self) -> &ImageWidgetConfig {
        &self.config
    }

    /// Load a volume, centering every slice and regenerating outline and contour
    ///
    /// Nothing is changed when the volume or the contour is rejected.
    pub fn set_image_data(
        &mut self,
        image: Arc<ImageVolume>,
        renderer: Option<&mut Renderer>,
    ) -> Result<()> {
        let dimensions = image.dimensions();
        if dimensions.contains(&0) {
            return Err(Error::InvalidData(format!(
                "Cannot show a volume with dimensions {:?}",
                dimensions
            )));
        }

        let points = image.number_of_points();
        let surface = if points < self.config.contour_point_limit {
            Some(contour(&image, self.config.contour_iso_value)?)
        } else {
            None
        };

        let table = LookupTable::grayscale(image.scalar_range());
        for rep in &mut self.slice_reps {
            rep.set_color_map(table.clone());
        }

        self.image = Some(image.clone());
        self.selected_axis = None;
        for axis in Axis::ALL {
            let centered = dimensions[axis.index()] / 2;
            self.set_slice_index(axis, centered as i64)?;
        }

        self.outline_rep.set_poly_data(volume_outline(&image));

        if let Some(surface) = surface {
            tracing::debug!(
                triangles = surface.triangle_count(),
                iso = self.config.contour_iso_value,
                "generated contour"
            );
            self.contour_rep.set_poly_data(surface);
            let [r, g, b] = self.config.contour_color;
            self.contour_rep.set_color(r, g, b, self.config.initial_contour_alpha);
            self.contour_visibility = ContourVisibility::Translucent;
        } else {
            tracing::info!(
                points,
                limit = self.config.contour_point_limit,
                "volume too large, skipping contour"
            );
            self.contour_rep.set_poly_data(PolyMesh::new());
            self.contour_visibility = ContourVisibility::Hidden;
        }

        if let Some(renderer) = renderer {
            self.sync_contour_attachment(renderer);
        }

        tracing::debug!(?dimensions, indices = ?self.slice_indices, "image widget loaded volume");
        Ok(())
    }

    pub fn image_data(&self) -> Option<&Arc<ImageVolume>> {
        self.image.as_ref()
    }

    /// Move the slice along `axis` to `index`, clamped into the volume
    ///
    /// Returns the index actually stored.
    pub fn set_slice_index(&mut self, axis: Axis, index: i64) -> Result<usize> {
        let image = self
            .image
            .clone()
            .ok_or_else(|| Error::InvalidData("No image data set on widget".to_string()))?;
        let last = image.dimensions()[axis.index()].saturating_sub(1);
        let clamped = index.clamp(0, last as i64) as usize;

        let slice = image.extract_slice(axis, clamped)?;
        let rep = &mut self.slice_reps[axis.index()];
        rep.set_image_data(&slice, axis)?;
        self.pick_geometry.set_plane(axis, rep.image_plane_poly_data())?;
        self.slice_indices[axis.index()] = clamped;

        tracing::trace!(%axis, index = clamped, "slice index set");
        Ok(clamped)
    }

    pub fn slice_index(&self, axis: Axis) -> usize {
        self.slice_indices[axis.index()]
    }

    pub fn slice_indices(&self) -> [usize; 3] {
        self.slice_indices
    }

    /// Axis currently driven by pan gestures
    pub fn selected_axis(&self) -> Option<Axis> {
        self.selected_axis
    }

    pub fn scroll_slice_mode_active(&self) -> bool {
        self.selected_axis.is_some()
    }

    pub fn contour_visibility(&self) -> ContourVisibility {
        self.contour_visibility
    }

    pub fn last_pick(&self) -> Option<PickResult> {
        self.last_pick
    }

    /// Whether the next pick rebuilds the locator
    pub fn pick_geometry_is_stale(&self) -> bool {
        self.pick_geometry.dirty
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn slice_representation(&self, axis: Axis) -> &ImagePlaneRepresentation {
        &self.slice_reps[axis.index()]
    }

    pub fn contour_representation(&self) -> &PolyDataRepresentation {
        &self.contour_rep
    }

    pub fn outline_representation(&self) -> &PolyDataRepresentation {
        &self.outline_rep
    }

    /// All five representations in attach order
    fn representations(&self) -> impl Iterator<Item = &dyn Representation> {
        self.slice_reps
            .iter()
            .map(|rep| rep as &dyn Representation)
            .chain([
                &self.contour_rep as &dyn Representation,
                &self.outline_rep as &dyn Representation,
            ])
    }

    fn sync_contour_attachment(&mut self, renderer: &mut Renderer) {
        if !self.attached {
            return;
        }
        if self.contour_visibility == ContourVisibility::Hidden {
            self.contour_rep.remove_self_from_renderer(renderer);
        } else {
            self.contour_rep.add_self_to_renderer(renderer);
        }
    }

    /// Translate a screen delta into a slice step along the selected axis
    fn scroll_image_slice(&mut self, renderer: &Renderer, axis: Axis, dx: f64, dy: f64) {
        let dy = -dy;
        let delta = self
            .projected_motion(renderer, axis, dx, dy)
            .filter(|d| d.is_finite() && d.abs() >= self.config.motion_epsilon)
            .unwrap_or(dy);

        // NaN or infinite gestures carry no usable motion
        if !delta.is_finite() {
            return;
        }

        let mut step = delta.trunc() as i64;
        if step == 0 && delta != 0.0 {
            step = if delta > 0.0 { 1 } else { -1 };
        }
        if step == 0 {
            return;
        }

        let target = (self.slice_indices[axis.index()] as i64).saturating_add(step);
        if let Err(err) = self.set_slice_index(axis, target) {
            tracing::warn!(%axis, %err, "slice scroll failed");
        }
    }

    /// World motion of a display delta at the focal depth, along `axis`
    fn projected_motion(&self, renderer: &Renderer, axis: Axis, dx: f64, dy: f64) -> Option<f64> {
        let focal = renderer.camera().focal_point.cast::<f64>();
        let focal_display = renderer.world_to_display(&focal)?;
        let p0 = renderer.display_to_world(&focal_display)?;
        let p1 = renderer.display_to_world(&Point3d::new(
            focal_display.x + dx,
            focal_display.y + dy,
            focal_display.z,
        ))?;
        let motion = p1 - p0;
        Some(motion.dot(&axis.unit_vector().cast::<f64>()))
    }

    /// Pick segment from the camera through a display point
    fn pick_ray(&self, renderer: &Renderer, x: i32, y: i32) -> Option<(Point3f, Point3f)> {
        let y = f64::from(renderer.height()) - f64::from(y);
        let camera = renderer.camera();
        let focal_display = renderer.world_to_display(&camera.focal_point.cast::<f64>())?;

        let p0 = camera.position.cast::<f64>();
        let through = renderer.display_to_world(&Point3d::new(f64::from(x), y, focal_display.z))?;
        let direction = (through - p0).try_normalize(f64::EPSILON)?;
        let p1 = through + direction * self.config.pick_ray_extension;
        Some((p0.cast::<f32>(), p1.cast::<f32>()))
    }
}

impl Default for ImageWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Representation for ImageWidget {
    /// Attach planes and outline, and the contour unless it is hidden
    fn add_self_to_renderer(&mut self, renderer: &mut Renderer) {
        for rep in &mut self.slice_reps {
            rep.add_self_to_renderer(renderer);
        }
        self.outline_rep.add_self_to_renderer(renderer);
        self.attached = true;
        self.sync_contour_attachment(renderer);
    }

    fn remove_self_from_renderer(&mut self, renderer: &mut Renderer) {
        for rep in &mut self.slice_reps {
            rep.remove_self_from_renderer(renderer);
        }
        self.contour_rep.remove_self_from_renderer(renderer);
        self.outline_rep.remove_self_from_renderer(renderer);
        self.attached = false;
    }

    fn number_of_facets(&self) -> usize {
        self.representations().map(|rep| rep.number_of_facets()).sum()
    }

    fn number_of_vertices(&self) -> usize {
        self.representations().map(|rep| rep.number_of_vertices()).sum()
    }

    fn number_of_lines(&self) -> usize {
        self.representations().map(|rep| rep.number_of_lines()).sum()
    }
}

impl GestureHandler for ImageWidget {
    fn handle_single_touch_down(&mut self, renderer: &Renderer, x: i32, y: i32) -> bool {
        let pick = self
            .pick_ray(renderer, x, y)
            .and_then(|(p0, p1)| self.pick_geometry.pick(&p0, &p1, self.config.pick_tolerance));

        match pick {
            Some(result) => {
                tracing::debug!(axis = %result.axis, t = result.t, "picked slice plane");
                self.selected_axis = Some(result.axis);
                self.last_pick = Some(result);
                true
            }
            None => {
                self.selected_axis = None;
                false
            }
        }
    }

    fn handle_single_touch_up(&mut self) -> bool {
        self.selected_axis.take().is_some()
    }

    fn handle_single_touch_pan_gesture(&mut self, renderer: &Renderer, dx: f64, dy: f64) -> bool {
        let Some(axis) = self.selected_axis else {
            return false;
        };
        self.scroll_image_slice(renderer, axis, dx, dy);
        true
    }

    fn handle_double_tap(&mut self, renderer: &mut Renderer) -> bool {
        self.contour_visibility = self.contour_visibility.next();
        let [r, g, b] = self.config.contour_color;
        match self.contour_visibility {
            ContourVisibility::Hidden => {}
            ContourVisibility::Translucent => {
                self.contour_rep.set_color(r, g, b, self.config.translucent_contour_alpha);
            }
            ContourVisibility::Opaque => {
                self.contour_rep.set_color(r, g, b, self.config.opaque_contour_alpha);
            }
        }
        self.sync_contour_attachment(renderer);
        tracing::debug!(visibility = ?self.contour_visibility, "contour visibility changed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_volume(dimensions: [usize; 3]) -> Arc<ImageVolume> {
        Arc::new(
            ImageVolume::from_fn(dimensions, [1.0; 3], Point3f::origin(), |x, y, z| {
                (x + y + z) as f32
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_contour_visibility_cycle() {
        let start = ContourVisibility::Hidden;
        assert_eq!(start.next(), ContourVisibility::Translucent);
        assert_eq!(start.next().next(), ContourVisibility::Opaque);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_slice_index_requires_image() {
        let mut widget = ImageWidget::new();
        assert!(widget.set_slice_index(Axis::X, 3).is_err());
    }

    #[test]
    fn test_slice_change_marks_pick_geometry_stale() {
        let mut widget = ImageWidget::new();
        widget.set_image_data(ramp_volume([6, 6, 6]), None).unwrap();
        assert!(widget.pick_geometry_is_stale());

        widget.pick_geometry.rebuild_if_dirty();
        assert!(!widget.pick_geometry_is_stale());
        assert_eq!(widget.pick_geometry.locator.number_of_cells(), 6);

        widget.set_slice_index(Axis::Y, 1).unwrap();
        assert!(widget.pick_geometry_is_stale());
    }

    #[test]
    fn test_pick_tags_come_from_axis() {
        let mut widget = ImageWidget::new();
        widget.set_image_data(ramp_volume([6, 6, 6]), None).unwrap();

        // Straight down the x axis through the y/z center; only the X plane
        // is crossed away from its edges.
        let p0 = Point3f::new(-10.0, 1.5, 4.5);
        let p1 = Point3f::new(20.0, 1.5, 4.5);
        let pick = widget.pick_geometry.pick(&p0, &p1, 1e-6).unwrap();
        assert_eq!(pick.axis, Axis::X);
        assert!((pick.point.x - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut widget = ImageWidget::new();
        let empty = Arc::new(ImageVolume::new([0, 4, 4], [1.0; 3], Point3f::origin()));
        assert!(widget.set_image_data(empty, None).is_err());
        assert!(widget.image_data().is_none());
    }

    #[test]
    fn test_pan_gated_by_selection() {
        let renderer = Renderer::default();
        let mut widget = ImageWidget::new();
        widget.set_image_data(ramp_volume([4, 4, 4]), None).unwrap();
        assert!(!widget.handle_single_touch_pan_gesture(&renderer, 0.0, -10.0));
        assert_eq!(widget.slice_indices(), [2, 2, 2]);
    }
}
