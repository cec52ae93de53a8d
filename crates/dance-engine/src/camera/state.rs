use glam::DVec3;

use super::path::PathShape;

/// Camera time accumulators.
///
/// `t` drives the path curve; `h` drives the sideways swing. Both advance by the same
/// step but are never folded back into one period, so they are kept in `f64` to avoid
/// jitter once the trigonometric arguments grow large.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub t: f64,
    pub h: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self { t: 0.0, h: -3.0 }
    }
}

impl CameraState {
    #[inline]
    pub const fn new(t: f64, h: f64) -> Self {
        Self { t, h }
    }

    /// Adds `step` to both accumulators.
    #[inline]
    pub fn advance(&mut self, step: f64) {
        self.t += step;
        self.h += step;
    }

    /// Returns a copy advanced by `step`.
    #[inline]
    #[must_use]
    pub fn advanced(mut self, step: f64) -> Self {
        self.advance(step);
        self
    }

    /// World-space eye position `(radius·sin h, X(t), Y(t))`.
    pub fn eye(self, radius: f64, shape: PathShape) -> DVec3 {
        let offset = shape.offset(self.t);
        DVec3::new(radius * self.h.sin(), offset.x, offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_starting_point() {
        let s = CameraState::default();
        assert_eq!(s.t, 0.0);
        assert_eq!(s.h, -3.0);
    }

    #[test]
    fn advance_moves_both_in_lockstep() {
        let mut s = CameraState::default();
        s.advance(0.001);
        assert_eq!(s.t, 0.001);
        assert_eq!(s.h, -3.0 + 0.001);
    }

    #[test]
    fn advance_is_additive() {
        // Exactly representable steps so the comparison is exact.
        let (s1, s2) = (0.25, 0.125);

        let mut split = CameraState::default();
        split.advance(s1);
        split.advance(s2);

        let mut joined = CameraState::default();
        joined.advance(s1 + s2);

        assert_eq!(split, joined);
    }

    #[test]
    fn advance_order_does_not_matter() {
        let a = CameraState::new(1.5, -2.0).advanced(0.5).advanced(2.0);
        let b = CameraState::new(1.5, -2.0).advanced(2.0).advanced(0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn long_runs_keep_resolution() {
        // Roughly ten hours at 60 Hz with the reference step.
        let frames = 10 * 60 * 60 * 60u64;
        let s = CameraState::default().advanced(0.001 * frames as f64);
        let next = s.advanced(0.001);
        assert!(next.t > s.t);
        assert!((next.t - s.t - 0.001).abs() < 1e-9);
    }

    #[test]
    fn eye_at_start() {
        let eye = CameraState::default().eye(4.0, PathShape::default());
        assert_eq!(eye.x, 4.0 * (-3.0f64).sin());
        assert_eq!(eye.y, 1.0);
        assert_eq!(eye.z, 0.0);
    }
}
