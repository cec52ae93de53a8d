use glam::{DMat4, DVec3};

use super::path::PathShape;
use super::state::CameraState;
use super::transform::Transform;

/// Fixed projection and framing parameters.
///
/// Everything here is frame-invariant; only the eye position moves, and it is derived
/// from [`CameraState`] on every [`build`](Self::build).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewProjection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f64,
    /// Width / height. Not tied to the window size.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    /// Look-at target.
    pub target: DVec3,
    pub up: DVec3,
    /// Amplitude of the sideways swing, `R` in `R·sin(h)`.
    pub radius: f64,
    pub shape: PathShape,
}

impl Default for ViewProjection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 100.0,
            target: DVec3::ZERO,
            up: DVec3::Y,
            radius: 4.0,
            shape: PathShape::default(),
        }
    }
}

impl ViewProjection {
    /// Perspective projection, `[0, 1]` depth range.
    pub fn projection(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Object placement. Nothing in the scene moves on its own.
    pub fn model(&self) -> DMat4 {
        DMat4::IDENTITY
    }

    pub fn eye(&self, camera: CameraState) -> DVec3 {
        camera.eye(self.radius, self.shape)
    }

    pub fn view(&self, camera: CameraState) -> DMat4 {
        DMat4::look_at_rh(self.eye(camera), self.target, self.up)
    }

    /// Builds `projection × view × model` for the current camera state.
    pub fn build(&self, camera: CameraState) -> Transform {
        Transform(self.projection() * self.view(camera) * self.model())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec4;

    #[test]
    fn target_projects_to_screen_center() {
        let vp = ViewProjection::default();
        let m = vp.build(CameraState::default()).matrix();
        let clip = m * DVec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < 1e-12);
        assert!((clip.y / clip.w).abs() < 1e-12);
    }

    #[test]
    fn target_depth_is_in_clip_range() {
        let vp = ViewProjection::default();
        let mut camera = CameraState::default();
        for _ in 0..1_000 {
            let clip = vp.build(camera).matrix() * DVec4::W;
            let z = clip.z / clip.w;
            assert!((0.0..=1.0).contains(&z), "target clipped: z = {z}");
            camera.advance(0.01);
        }
    }

    #[test]
    fn model_is_identity() {
        assert_eq!(ViewProjection::default().model(), DMat4::IDENTITY);
    }

    #[test]
    fn eye_follows_state() {
        let vp = ViewProjection::default();
        let camera = CameraState::new(0.0, std::f64::consts::FRAC_PI_2);
        let eye = vp.eye(camera);
        assert!((eye.x - 4.0).abs() < 1e-12);
        assert_eq!(eye.y, 1.0);
        assert_eq!(eye.z, 0.0);
    }

    #[test]
    fn never_degenerate_along_default_path() {
        let vp = ViewProjection::default();
        let mut camera = CameraState::default();
        let step = 0.01;
        while camera.t <= 10_000.0 {
            let det = vp.build(camera).matrix().determinant();
            assert!(det.is_finite(), "non-finite determinant at t={}", camera.t);
            assert!(det.abs() > 1e-9, "degenerate matrix at t={}", camera.t);
            camera.advance(step);
        }
    }

    #[test]
    fn transform_changes_as_camera_moves() {
        let vp = ViewProjection::default();
        let a = vp.build(CameraState::default());
        let b = vp.build(CameraState::default().advanced(0.001));
        assert_ne!(a, b);
    }
}
