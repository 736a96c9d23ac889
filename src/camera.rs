use glam::{Mat4, Vec3, Vec4};

use crate::math::Ray;

/// Perspective camera aimed at a target point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_deg,
            aspect,
            near,
            far,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit view direction; falls back to -Z when position and target coincide
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let mut target = self.target;
        if target == self.position {
            target = self.position + Vec3::NEG_Z;
        }
        Mat4::look_at_rh(self.position, target, self.up)
    }

    /// OpenGL-style projection (clip z in -1..1)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Keep the projection matched to a viewport of the given pixel size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.set_aspect(width as f32 / height as f32);
        }
    }

    /// World-space ray through a point in normalized device coordinates
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        RayGenerator::new(self).ray(ndc_x, ndc_y)
    }
}

/// Cached inverse view-projection for casting many rays from one camera
#[derive(Debug, Clone, Copy)]
pub struct RayGenerator {
    origin: Vec3,
    inverse_view_projection: Mat4,
}

impl RayGenerator {
    pub fn new(camera: &PerspectiveCamera) -> Self {
        Self {
            origin: camera.position,
            inverse_view_projection: camera.view_projection().inverse(),
        }
    }

    pub fn ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        // Unproject a point halfway into the depth range
        let clip = self.inverse_view_projection * Vec4::new(ndc_x, ndc_y, 0.5, 1.0);
        let point = clip.truncate() / clip.w;
        let dir = (point - self.origin).try_normalize().unwrap_or(Vec3::NEG_Z);
        Ray::new(self.origin, dir)
    }
}
