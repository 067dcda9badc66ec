use glam::{Mat4, Vec3, vec3};

pub const NEAR: f32 = 1.0;
pub const FAR: f32 = 5000.0;

/// An orbiting look-at camera. The target is the single source of truth for
/// where the camera aims and where the orientation guide sits; panning moves
/// both together.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    fov_y: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Self::DEFAULT_POSITION,
            target: Vec3::ZERO,
            fov_y: 45.0f32.to_radians(),
            near: NEAR,
            far: FAR,
        }
    }
}

impl Camera {
    pub const DEFAULT_POSITION: Vec3 = vec3(500.0, 500.0, 500.0);

    /// Vector from the target to the eye.
    pub fn offset(&self) -> Vec3 {
        self.eye - self.target
    }

    pub fn distance_to_target(&self) -> f32 {
        self.offset().length()
    }

    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    pub fn get_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up())
    }

    pub fn build_view_proj_matrix(&self, width: f32, height: f32) -> Mat4 {
        let aspect_ratio = width / height;

        let proj = Mat4::perspective_rh(self.fov_y, aspect_ratio, self.near, self.far);

        proj * self.get_view()
    }

    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    /// Moves eye and target by the same amount, keeping distance and
    /// orientation relative to the target.
    pub fn translate(&mut self, offset: Vec3) {
        self.eye += offset;
        self.target += offset;
    }
}
