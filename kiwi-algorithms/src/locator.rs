//! Spatial index over mesh triangles for line intersection queries

use crate::intersection::intersect_segment_triangle;
use kiwi_core::{Point3f, PolyMesh};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

type CellEnvelope = GeomWithData<Rectangle<[f32; 3]>, usize>;

/// Nearest intersection of a line segment with a located mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Triangle id in the located mesh
    pub cell_id: usize,
    /// Segment parameter of the hit, 0 at the start point
    pub t: f32,
    /// World position of the hit
    pub point: Point3f,
    /// Barycentric coordinates relative to the second and third corner
    pub parametric: [f32; 2],
}

/// R*-tree of triangle bounding boxes
///
/// The locator copies the triangles it indexes; rebuild it when the source
/// mesh changes.
pub struct CellLocator {
    tree: RTree<CellEnvelope>,
    triangles: Vec<[Point3f; 3]>,
}

impl CellLocator {
    /// Index every triangle of `mesh`; line cells are ignored
    pub fn build(mesh: &PolyMesh) -> Self {
        let triangles: Vec<[Point3f; 3]> = (0..mesh.triangle_count())
            .filter_map(|i| mesh.triangle_points(i))
            .collect();

        let envelopes: Vec<CellEnvelope> = triangles
            .iter()
            .enumerate()
            .map(|(id, tri)| {
                let lo = tri[0].inf(&tri[1]).inf(&tri[2]);
                let hi = tri[0].sup(&tri[1]).sup(&tri[2]);
                GeomWithData::new(Rectangle::from_corners(lo.into(), hi.into()), id)
            })
            .collect();

        let tree = RTree::bulk_load(envelopes);
        tracing::trace!(cells = triangles.len(), "built cell locator");
        Self { tree, triangles }
    }

    /// Number of indexed triangles
    pub fn number_of_cells(&self) -> usize {
        self.triangles.len()
    }

    /// First triangle crossed by the segment `p0 -> p1`, nearest to `p0`
    pub fn intersect_with_line(
        &self,
        p0: &Point3f,
        p1: &Point3f,
        tolerance: f32,
    ) -> Option<RayHit> {
        let pad = tolerance.max(0.0) * (p1 - p0).norm();
        let lo = p0.inf(p1).map(|c| c - pad);
        let hi = p0.sup(p1).map(|c| c + pad);
        let query: AABB<[f32; 3]> = AABB::from_corners(lo.into(), hi.into());

        self.tree
            .locate_in_envelope_intersecting(&query)
            .filter_map(|candidate| {
                let cell_id = candidate.data;
                let tri = &self.triangles[cell_id];
                intersect_segment_triangle(p0, p1, tri, tolerance).map(|(t, u, v)| RayHit {
                    cell_id,
                    t,
                    point: p0 + (p1 - p0) * t,
                    parametric: [u, v],
                })
            })
            .min_by(|a, b| a.t.total_cmp(&b.t).then(a.cell_id.cmp(&b.cell_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two quads facing +z at z = 0 and z = -2
    fn stacked_quads() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        for z in [0.0, -2.0] {
            let quad = PolyMesh::from_triangles(
                vec![
                    Point3f::new(-1.0, -1.0, z),
                    Point3f::new(1.0, -1.0, z),
                    Point3f::new(1.0, 1.0, z),
                    Point3f::new(-1.0, 1.0, z),
                ],
                vec![[0, 1, 2], [0, 2, 3]],
            );
            mesh.append(&quad);
        }
        mesh
    }

    #[test]
    fn test_nearest_hit_wins() {
        let locator = CellLocator::build(&stacked_quads());
        assert_eq!(locator.number_of_cells(), 4);

        let hit = locator
            .intersect_with_line(&Point3f::new(0.2, 0.5, 5.0), &Point3f::new(0.2, 0.5, -5.0), 0.0)
            .unwrap();
        assert!(hit.cell_id < 2);
        assert_relative_eq!(hit.point.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(hit.t, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_reverse_direction_hits_other_quad() {
        let locator = CellLocator::build(&stacked_quads());
        let hit = locator
            .intersect_with_line(&Point3f::new(0.2, 0.5, -5.0), &Point3f::new(0.2, 0.5, 5.0), 0.0)
            .unwrap();
        assert!(hit.cell_id >= 2);
        assert_relative_eq!(hit.point.z, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_miss() {
        let locator = CellLocator::build(&stacked_quads());
        let hit = locator.intersect_with_line(
            &Point3f::new(3.0, 0.0, 5.0),
            &Point3f::new(3.0, 0.0, -5.0),
            0.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_empty_mesh() {
        let locator = CellLocator::build(&PolyMesh::new());
        assert_eq!(locator.number_of_cells(), 0);
        assert!(locator
            .intersect_with_line(&Point3f::origin(), &Point3f::new(0.0, 0.0, 1.0), 0.0)
            .is_none());
    }
}
