use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Ray in another frame; `dir` is not renormalized so `t` stays comparable
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            dir: matrix.transform_vector3(self.dir),
        }
    }
}

/// Entry and exit distances of a ray through a box, `None` on a miss
pub fn slab_interval(ray_origin: Vec3, ray_dir: Vec3, box_min: Vec3, box_max: Vec3) -> Option<(f32, f32)> {
    const EPSILON: f32 = 1e-8;

    // Near-zero components clamp to a huge inverse instead of dividing by zero
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.x) } else { 1.0 / ray_dir.x },
        if ray_dir.y.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.y) } else { 1.0 / ray_dir.y },
        if ray_dir.z.abs() < EPSILON { 1.0 / EPSILON.copysign(ray_dir.z) } else { 1.0 / ray_dir.z },
    );

    let t_min = (box_min - ray_origin) * inv_dir;
    let t_max = (box_max - ray_origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.x.max(t1.y).max(t1.z);
    let t_far = t2.x.min(t2.y).min(t2.z);

    if t_near > t_far || t_far < 0.0 {
        None
    } else {
        Some((t_near, t_far))
    }
}

/// Nearest positive hit distance against a box, or -1.0 on a miss
pub fn intersect_aabb(ray_origin: Vec3, ray_dir: Vec3, box_min: Vec3, box_max: Vec3) -> f32 {
    match slab_interval(ray_origin, ray_dir, box_min, box_max) {
        None => -1.0,
        Some((t_near, t_far)) if t_near < 0.0 => {
            if t_far > 0.001 {
                t_far
            } else {
                -1.0
            }
        }
        Some((t_near, _)) => t_near,
    }
}

/// Both roots of a ray against a sphere, nearest first
pub fn sphere_roots(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<(f32, f32)> {
    let oc = ray_origin - center;
    let a = ray_dir.dot(ray_dir);
    let half_b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 || a == 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    Some(((-half_b - sqrt_d) / a, (-half_b + sqrt_d) / a))
}
