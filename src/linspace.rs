use num::Float;

/// Evenly spaced points over `[min, max]`, both ends included, like numpy.linspace
pub struct Linspace<F> {
    start: F,
    end: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, n: usize) -> Self {
        let step = match F::from(n.saturating_sub(1)) {
            Some(num_steps) if n > 1 => (max - min) / num_steps,
            _ => F::zero(),
        };

        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }

    /// Number of points needed to cover `[min, max]` at roughly `step` apart.
    pub fn points_for_step(min: F, max: F, step: F) -> usize {
        // round instead of floor so that 1.0 / 0.01 == 99.99999 still yields 101 points
        ((max - min) / step).round().to_usize().map_or(1, |n| n + 1)
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // Pin the last point so rounding never leaves it short of the end
        if i + 1 == self.len && self.len > 1 {
            return Some(self.end);
        }

        F::from(i).map(|i| self.start + self.step * i)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 10., 11).collect();

    assert_eq!(points, vec![0., 1., 2., 3., 4., 5., 6., 7., 8., 9., 10.]);
    assert_eq!(Linspace::points_for_step(0., 1., 0.01), 101);
    assert_eq!(Linspace::points_for_step(50., 350., 1.), 301);

    let single: Vec<f64> = Linspace::new(3., 3., 1).collect();

    assert_eq!(single, vec![3.]);
}
