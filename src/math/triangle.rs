use glam::Vec3;

/// Result of triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32,
    pub u: f32,
    pub v: f32,
    /// Geometric normal from counter-clockwise winding
    pub normal: Vec3,
    /// Ray arrived from the side the normal points to
    pub front_facing: bool,
}

/// Möller-Trumbore ray-triangle intersection, both faces
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if t < EPSILON {
        return None;
    }

    Some(TriangleIntersection {
        t,
        u,
        v,
        normal: edge1.cross(edge2).normalize(),
        // det = -dir . (edge1 x edge2)
        front_facing: a > 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0: Vec3 = Vec3::new(-1.0, -1.0, 0.0);
    const V1: Vec3 = Vec3::new(1.0, -1.0, 0.0);
    const V2: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    #[test]
    fn test_hit_front_face() {
        let hit = moller_trumbore_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, V0, V1, V2).unwrap();
        assert!((hit.t - 5.0).abs() < 1e-5);
        assert!(hit.front_facing);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_hit_back_face() {
        let hit = moller_trumbore_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, V0, V1, V2).unwrap();
        assert!(!hit.front_facing);
    }

    #[test]
    fn test_miss_outside_and_behind() {
        assert!(moller_trumbore_intersect(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, V0, V1, V2).is_none());
        assert!(moller_trumbore_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, V0, V1, V2).is_none());
    }

    #[test]
    fn test_parallel_ray() {
        assert!(moller_trumbore_intersect(Vec3::new(0.0, 0.0, 1.0), Vec3::X, V0, V1, V2).is_none());
    }
}
