use glam::{Mat4, Quat, Vec3};

/// Position, orientation and scale of a scene node
///
/// Translations and rotations given in local space follow the node's current
/// orientation: moving along local -Z always means "forward" for the node,
/// whatever way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Move along an axis expressed in local space (scale is ignored)
    pub fn translate_on_axis(&mut self, local_axis: Vec3, distance: f32) {
        self.position += self.rotation * local_axis * distance;
    }

    pub fn translate_x(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::X, distance);
    }

    pub fn translate_z(&mut self, distance: f32) {
        self.translate_on_axis(Vec3::Z, distance);
    }

    /// Rotate about an axis expressed in local space
    pub fn rotate_on_axis(&mut self, local_axis: Vec3, angle: f32) {
        self.rotation = (self.rotation * Quat::from_axis_angle(local_axis, angle)).normalize();
    }

    /// Local-to-world matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn local_to_world(&self, point: Vec3) -> Vec3 {
        self.matrix().transform_point3(point)
    }

    /// Local -Z in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Yaw about world +Y in radians, 0 when facing -Z, wrapped to (-π, π]
    pub fn heading(&self) -> f32 {
        let forward = self.forward();
        (-forward.x).atan2(-forward.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
