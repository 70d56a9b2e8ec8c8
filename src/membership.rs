use crate::error::{ConfigError, Result};

/// Triangular membership function with feet at `a` and `c` and its peak at `b`.
///
/// `a == b` or `b == c` give a shoulder: the curve jumps straight to 1 at `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();

        if !finite || a > b || b > c {
            return Err(ConfigError::InvalidTriangle { a, b, c }.into());
        }

        Ok(Self { a, b, c })
    }

    pub fn points(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Degree of membership of `x`, always in `[0, 1]`.
    ///
    /// No clamping to a universe happens here; callers do that.
    pub fn evaluate(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x == b {
            1.
        } else if !(x > a && x < c) {
            // Also catches NaN
            0.
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }
}
