//! Newton-Raphson inversion of the standard normal CDF.
//!
//! Solves Φ(x) = p by iterating
//!
//! ```text
//! x ← x − (Φ(x) − p) / Φ'(x)
//! ```
//!
//! starting from `x0 = p`. Φ is convex left of zero and concave right of it,
//! so the iterates approach the root monotonically once they are on the
//! tail side of it.

use tracing::{debug, trace, warn};

use crate::adaptive::{cdf_residual_floor, cdf_tail_floor, stall_threshold};
use crate::error::{NumericError, NumericResult};
use crate::normal::GaussianCdf;
use crate::types::{NewtonConfig, RombergConfig};

/// Inverse standard normal CDF solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseCdfSolver {
    cdf: GaussianCdf,
    newton: NewtonConfig,
}

impl InverseCdfSolver {
    pub fn new(romberg: RombergConfig, newton: NewtonConfig) -> NumericResult<Self> {
        newton.validate()?;
        Ok(Self {
            cdf: GaussianCdf::new(romberg)?,
            newton,
        })
    }

    pub fn cdf(&self) -> &GaussianCdf {
        &self.cdf
    }

    pub fn newton_config(&self) -> &NewtonConfig {
        &self.newton
    }

    /// Find `x` with Φ(x) = `target`.
    ///
    /// `target` must lie strictly inside (0, 1). Returns
    /// [`NumericError::DidNotConverge`] if the iteration cap is reached, if
    /// the density underflows before the step tolerance is met, or if the
    /// tail `min(target, 1 − target)` is below [`cdf_tail_floor`]. In the
    /// last case the error carries the final iterate as its estimate, but
    /// Φ cannot resolve the tail well enough to vouch for it.
    pub fn solve(&self, target: f64) -> NumericResult<f64> {
        if !(target.is_finite() && target > 0.0 && target < 1.0) {
            return Err(NumericError::InvalidProbability { value: target });
        }

        let NewtonConfig {
            tolerance,
            max_iterations,
        } = self.newton;

        let resolvable = target.min(1.0 - target) >= cdf_tail_floor();
        let mut x = target;
        let mut last_step = f64::INFINITY;

        for iteration in 1..=max_iterations {
            let residual = self.cdf.phi(x)? - target;
            let slope = self.cdf.derivative(x);

            if residual == 0.0 && resolvable {
                return Ok(x);
            }
            let step = residual / slope;
            if !step.is_finite() {
                warn!(x, target, iteration, "normal density underflowed during inversion");
                return Err(NumericError::DidNotConverge {
                    context: "inverse_cdf",
                    iterations: iteration,
                    tolerance,
                    estimate: x,
                    error_estimate: last_step,
                });
            }

            x -= step;
            // Rounding in Φ bounds how small the step can get; once it stops
            // shrinking the iterate is as good as it will become.
            let stalled = step.abs() >= last_step && last_step <= stall_threshold(x);
            last_step = step.abs();
            trace!(iteration, x, residual, step, "newton step");

            if last_step <= tolerance || residual.abs() <= cdf_residual_floor() || stalled {
                if !resolvable {
                    warn!(target, estimate = x, "target lies beyond the resolvable tail of Φ");
                    return Err(NumericError::DidNotConverge {
                        context: "inverse_cdf",
                        iterations: iteration,
                        tolerance,
                        estimate: x,
                        error_estimate: last_step,
                    });
                }
                debug!(iterations = iteration, x, target, "inverse cdf converged");
                return Ok(x);
            }
        }

        warn!(target, estimate = x, max_iterations, "inverse cdf exhausted its iteration budget");
        Err(NumericError::DidNotConverge {
            context: "inverse_cdf",
            iterations: max_iterations,
            tolerance,
            estimate: x,
            error_estimate: last_step,
        })
    }
}

/// Inverse standard normal CDF with default settings.
///
/// # Example
///
/// ```rust
/// use shannon_numerics::inverse_cdf;
///
/// let x = inverse_cdf(0.975).unwrap();
/// assert!((x - 1.959964).abs() < 1e-6);
/// ```
pub fn inverse_cdf(target: f64) -> NumericResult<f64> {
    InverseCdfSolver::default().solve(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normal::phi;

    #[test]
    fn test_round_trip() {
        for x in [-2.5, -1.0, 0.0, 1.0, 2.5] {
            let p = phi(x).unwrap();
            let recovered = inverse_cdf(p).unwrap();
            assert!((recovered - x).abs() < 1e-6, "x = {}, recovered {}", x, recovered);
        }
    }

    #[test]
    fn test_median() {
        assert!(inverse_cdf(0.5).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_known_quantiles() {
        let cases = [
            (0.8413447460685429, 1.0),
            (0.975, 1.959963984540054),
            (0.05, -1.6448536269514729),
        ];
        for (p, expected) in cases {
            let x = inverse_cdf(p).unwrap();
            assert!((x - expected).abs() < 1e-8, "inverse_cdf({}) = {}", p, x);
        }
    }

    #[test]
    fn test_out_of_range_targets_rejected() {
        for p in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(
                matches!(inverse_cdf(p), Err(NumericError::InvalidProbability { .. })),
                "target {} accepted",
                p
            );
        }
    }

    #[test]
    fn test_iteration_cap_reports_estimate() {
        let solver = InverseCdfSolver::new(
            RombergConfig::default(),
            NewtonConfig {
                tolerance: 1e-15,
                max_iterations: 1,
            },
        )
        .unwrap();
        let err = solver.solve(0.999).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.best_estimate().unwrap().is_finite());
    }

    #[test]
    fn test_moderate_tail() {
        // Φ(-4.753424) ≈ 1e-6
        let x = inverse_cdf(1e-6).unwrap();
        assert!((x + 4.753424308822899).abs() < 1e-6);
    }

    #[test]
    fn test_unresolvable_tails_report_estimate() {
        for target in [1e-300, 1e-100, 1e-15, 1.0 - 1e-12] {
            match inverse_cdf(target) {
                Err(err @ NumericError::DidNotConverge { .. }) => {
                    assert!(err.is_recoverable());
                    assert!(err.best_estimate().is_some());
                }
                other => panic!("target {} gave {:?}", target, other),
            }
        }
    }

    #[test]
    fn test_tail_floor_boundary_still_solves() {
        // Just inside the resolvable range on both sides.
        let x = inverse_cdf(1e-7).unwrap();
        assert!((x + 5.199337582192817).abs() < 1e-5, "got {}", x);
        let x = inverse_cdf(1.0 - 1e-7).unwrap();
        assert!((x - 5.199337582192817).abs() < 1e-4, "got {}", x);
    }
}
