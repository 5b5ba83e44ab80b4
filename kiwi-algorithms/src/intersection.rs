//! Segment / triangle intersection

use kiwi_core::Point3f;

/// Intersection of the segment `p0 -> p1` with a triangle.
///
/// Returns the segment parameter `t` in `[0, 1]` and the barycentric
/// coordinates `(u, v)` of the hit relative to `tri[1]` and `tri[2]`.
/// `tolerance` widens the triangle edges in barycentric units. Segments lying
/// in the triangle plane never intersect.
pub fn intersect_segment_triangle(
    p0: &Point3f,
    p1: &Point3f,
    tri: &[Point3f; 3],
    tolerance: f32,
) -> Option<(f32, f32, f32)> {
    let dir = p1 - p0;
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];

    let h = dir.cross(&e2);
    let det = e1.dot(&h);
    let scale = e1.norm() * e2.norm() * dir.norm();
    if scale == 0.0 || det.abs() <= f32::EPSILON * scale {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = p0 - tri[0];
    let u = inv_det * s.dot(&h);
    if u < -tolerance || u > 1.0 + tolerance {
        return None;
    }

    let q = s.cross(&e1);
    let v = inv_det * dir.dot(&q);
    if v < -tolerance || u + v > 1.0 + tolerance {
        return None;
    }

    let t = inv_det * e2.dot(&q);
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some((t, u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xy_triangle() -> [Point3f; 3] {
        [
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(2.0, 0.0, 0.0),
            Point3f::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn test_perpendicular_hit() {
        let hit = intersect_segment_triangle(
            &Point3f::new(0.5, 0.5, 4.0),
            &Point3f::new(0.5, 0.5, -4.0),
            &xy_triangle(),
            0.0,
        );
        let (t, u, v) = hit.unwrap();
        assert_relative_eq!(t, 0.5);
        assert_relative_eq!(u, 0.25);
        assert_relative_eq!(v, 0.25);
    }

    #[test]
    fn test_segment_too_short() {
        let hit = intersect_segment_triangle(
            &Point3f::new(0.5, 0.5, 4.0),
            &Point3f::new(0.5, 0.5, 1.0),
            &xy_triangle(),
            0.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_outside_triangle() {
        let hit = intersect_segment_triangle(
            &Point3f::new(1.5, 1.5, 1.0),
            &Point3f::new(1.5, 1.5, -1.0),
            &xy_triangle(),
            0.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_coplanar_segment_misses() {
        let hit = intersect_segment_triangle(
            &Point3f::new(-1.0, 0.5, 0.0),
            &Point3f::new(3.0, 0.5, 0.0),
            &xy_triangle(),
            0.0,
        );
        assert!(hit.is_none());
    }
}
