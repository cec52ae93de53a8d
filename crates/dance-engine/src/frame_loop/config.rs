use crate::render::Color;

/// How far the camera accumulators move per frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepPolicy {
    /// Constant step per presented frame; speed follows the refresh rate.
    Fixed(f64),
    /// `rate` units per second of elapsed time.
    PerSecond(f64),
}

impl StepPolicy {
    #[inline]
    pub fn step_for(self, dt: f64) -> f64 {
        match self {
            Self::Fixed(step) => step,
            Self::PerSecond(rate) => rate * dt,
        }
    }
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self::Fixed(0.001)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoopConfig {
    pub clear_color: Color,
    pub step: StepPolicy,
    /// Frames between camera trace lines; 0 disables them.
    pub trace_every: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::DARK_BLUE,
            step: StepPolicy::default(),
            trace_every: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_ignores_elapsed_time() {
        let p = StepPolicy::Fixed(0.001);
        assert_eq!(p.step_for(0.0), 0.001);
        assert_eq!(p.step_for(0.25), 0.001);
    }

    #[test]
    fn per_second_scales_with_elapsed_time() {
        let p = StepPolicy::PerSecond(2.0);
        assert_eq!(p.step_for(0.5), 1.0);
        assert_eq!(p.step_for(0.0), 0.0);
    }

    #[test]
    fn defaults() {
        let c = LoopConfig::default();
        assert_eq!(c.step, StepPolicy::Fixed(0.001));
        assert_eq!(c.clear_color, Color::rgba(0.0, 0.0, 0.4, 0.0));
    }
}
