use glam::DVec2;

/// Shape parameters of the camera path curve.
///
/// The curve is the epitrochoid family
/// `X = (a+b)·cos t − b·cos(t·(a+b)/b)`, `Y = (a+b)·sin t − b·sin(t·(a+b)/b)`.
/// `b` must be non-zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathShape {
    pub a: f64,
    pub b: f64,
}

impl Default for PathShape {
    fn default() -> Self {
        Self { a: 1.0, b: 1.0 }
    }
}

impl PathShape {
    #[inline]
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Returns `(X(t), Y(t))` for this shape.
    #[inline]
    pub fn offset(self, t: f64) -> DVec2 {
        DVec2::new(x(t, self.a, self.b), y(t, self.a, self.b))
    }

    /// Upper bound on `|X|` and `|Y|` for every `t`.
    #[inline]
    pub fn extent(self) -> f64 {
        (self.a + self.b).abs() + self.b.abs()
    }
}

/// Horizontal component of the path.
#[inline]
pub fn x(t: f64, a: f64, b: f64) -> f64 {
    (a + b) * t.cos() - b * (t * ((a + b) / b)).cos()
}

/// Vertical component of the path.
#[inline]
pub fn y(t: f64, a: f64, b: f64) -> f64 {
    (a + b) * t.sin() - b * (t * ((a + b) / b)).sin()
}
