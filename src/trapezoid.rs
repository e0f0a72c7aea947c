//! Successive trapezoidal refinement.
//!
//! Stage 1 is the two-point trapezoid; every later stage adds the midpoints
//! of the previous grid, doubling the interior point count. The refiner is
//! a plain value owned by one integration, so independent integrations never
//! share state.

use crate::error::{NumericError, NumericResult};

/// Anything that can be evaluated as `f(x) -> f64`.
///
/// Implemented for every `Fn(f64) -> f64`, so closures and `fn` items work
/// directly.
pub trait Evaluable {
    fn evaluate(&self, x: f64) -> f64;
}

impl<F> Evaluable for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn evaluate(&self, x: f64) -> f64 {
        self(x)
    }
}

/// State of one sequence of trapezoidal refinements.
#[derive(Debug, Clone, Default)]
pub struct TrapezoidRefiner {
    /// Interior points to add on the next call.
    points_to_add: usize,
    /// Most recent estimate.
    estimate: f64,
    /// Last stage computed; 0 before the first call.
    stage: usize,
}

impl TrapezoidRefiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last stage computed, 0 if none.
    pub fn stage(&self) -> usize {
        self.stage
    }

    /// Most recent estimate, 0.0 if none.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Compute the `n`th stage of refinement of ∫f over [a, b].
    ///
    /// Must be called with `n = 1, 2, 3, ...` in order; any other `n`
    /// returns [`NumericError::RefinementOutOfSequence`] and leaves the state
    /// untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shannon_numerics::TrapezoidRefiner;
    ///
    /// let mut refiner = TrapezoidRefiner::new();
    /// let s1 = refiner.refine(&|x: f64| x * x, 0.0, 1.0, 1).unwrap();
    /// let s2 = refiner.refine(&|x: f64| x * x, 0.0, 1.0, 2).unwrap();
    /// assert!((s1 - 0.5).abs() < 1e-15);
    /// assert!((s2 - 0.375).abs() < 1e-15);
    /// ```
    pub fn refine<F>(&mut self, f: &F, a: f64, b: f64, n: usize) -> NumericResult<f64>
    where
        F: Evaluable + ?Sized,
    {
        let expected = self.stage + 1;
        if n != expected {
            return Err(NumericError::RefinementOutOfSequence { expected, got: n });
        }

        if n == 1 {
            self.points_to_add = 1;
            self.estimate = 0.5 * (b - a) * (f.evaluate(a) + f.evaluate(b));
        } else {
            let count = self.points_to_add as f64;
            let spacing = (b - a) / count;
            let mut x = a + 0.5 * spacing;
            let mut sum = 0.0;
            for _ in 0..self.points_to_add {
                sum += f.evaluate(x);
                x += spacing;
            }
            self.points_to_add *= 2;
            self.estimate = 0.5 * (self.estimate + (b - a) * sum / count);
        }

        self.stage = n;
        Ok(self.estimate)
    }
}
