//! Polygonal mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A mesh of points with triangle and line cells
///
/// Triangles and lines index into `points`. The optional per-point arrays must
/// match the point count; the setters ignore arrays of the wrong length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    pub points: Vec<Point3f>,
    pub triangles: Vec<[usize; 3]>,
    pub lines: Vec<[usize; 2]>,
    pub normals: Option<Vec<Vector3f>>,
    pub tcoords: Option<Vec<[f32; 2]>>,
}

impl PolyMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a triangle mesh from points and faces
    pub fn from_triangles(points: Vec<Point3f>, triangles: Vec<[usize; 3]>) -> Self {
        Self {
            points,
            triangles,
            ..Self::default()
        }
    }

    /// Create a wireframe mesh from points and line segments
    pub fn from_lines(points: Vec<Point3f>, lines: Vec<[usize; 2]>) -> Self {
        Self {
            points,
            lines,
            ..Self::default()
        }
    }

    /// Get the number of points
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of line segments
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of cells, triangles first then lines
    pub fn cell_count(&self) -> usize {
        self.triangles.len() + self.lines.len()
    }

    /// Check if the mesh has no cells
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.cell_count() == 0
    }

    /// Add a point to the mesh
    pub fn add_point(&mut self, point: Point3f) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// Corner positions of triangle `index`
    pub fn triangle_points(&self, index: usize) -> Option<[Point3f; 3]> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some([self.points[a], self.points[b], self.points[c]])
    }

    /// Set per-point normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.points.len() {
            self.normals = Some(normals);
        }
    }

    /// Set per-point texture coordinates
    pub fn set_tcoords(&mut self, tcoords: Vec<[f32; 2]>) {
        if tcoords.len() == self.points.len() {
            self.tcoords = Some(tcoords);
        }
    }

    /// Append the cells of `other`, offsetting its indices.
    ///
    /// Per-point arrays survive only when both meshes carry them.
    pub fn append(&mut self, other: &PolyMesh) {
        let offset = self.points.len();
        let was_empty = self.points.is_empty();

        self.normals = match (self.normals.take(), &other.normals) {
            (Some(mut a), Some(b)) => {
                a.extend_from_slice(b);
                Some(a)
            }
            (None, Some(b)) if was_empty => Some(b.clone()),
            _ => None,
        };
        self.tcoords = match (self.tcoords.take(), &other.tcoords) {
            (Some(mut a), Some(b)) => {
                a.extend_from_slice(b);
                Some(a)
            }
            (None, Some(b)) if was_empty => Some(b.clone()),
            _ => None,
        };

        self.points.extend_from_slice(&other.points);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
        self.lines
            .extend(other.lines.iter().map(|l| [l[0] + offset, l[1] + offset]));
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.points.clear();
        self.triangles.clear();
        self.lines.clear();
        self.normals = None;
        self.tcoords = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> PolyMesh {
        PolyMesh::from_triangles(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let quad = unit_quad();
        assert_eq!(quad.point_count(), 4);
        assert_eq!(quad.triangle_count(), 2);
        assert_eq!(quad.line_count(), 0);
        assert!(!quad.is_empty());
        assert!(PolyMesh::new().is_empty());
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = unit_quad();
        let lines = PolyMesh::from_lines(
            vec![Point3f::new(0.0, 0.0, 1.0), Point3f::new(1.0, 0.0, 1.0)],
            vec![[0, 1]],
        );
        mesh.append(&unit_quad());
        mesh.append(&lines);

        assert_eq!(mesh.point_count(), 10);
        assert_eq!(mesh.triangles[2], [4, 5, 6]);
        assert_eq!(mesh.lines, vec![[8, 9]]);
    }

    #[test]
    fn test_append_drops_partial_tcoords() {
        let mut with_tcoords = unit_quad();
        with_tcoords.set_tcoords(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);

        let mut mesh = PolyMesh::new();
        mesh.append(&with_tcoords);
        assert_eq!(mesh.tcoords.as_ref().map(Vec::len), Some(4));

        mesh.append(&unit_quad());
        assert!(mesh.tcoords.is_none());
    }

    #[test]
    fn test_setters_reject_wrong_length() {
        let mut mesh = unit_quad();
        mesh.set_normals(vec![Vector3f::z(); 3]);
        assert!(mesh.normals.is_none());
        mesh.set_normals(vec![Vector3f::z(); 4]);
        assert!(mesh.normals.is_some());
    }
}
