//! Romberg integration.
//!
//! Richardson extrapolation of successive trapezoidal estimates to zero step
//! size. The step tracker is quartered between stages even though the grid
//! spacing halves: the trapezoid error series is a polynomial in h², so the
//! extrapolation runs in h².

use tracing::{debug, trace, warn};

use crate::error::{NumericError, NumericResult};
use crate::extrapolate::neville_extrapolate;
use crate::trapezoid::{Evaluable, TrapezoidRefiner};
use crate::types::{Convergence, Extrapolation, RombergConfig};

/// Estimates and relative step sizes for one integration.
///
/// Owned by a single integration; independent states never share data.
#[derive(Debug, Clone, Default)]
pub struct IntegrationState {
    estimates: Vec<f64>,
    steps: Vec<f64>,
}

impl IntegrationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            estimates: Vec::with_capacity(capacity),
            steps: Vec::with_capacity(capacity),
        }
    }

    /// Record the next trapezoidal estimate; its step is a quarter of the
    /// previous one.
    pub fn push(&mut self, estimate: f64) {
        let step = self.steps.last().map_or(1.0, |h| 0.25 * h);
        self.estimates.push(estimate);
        self.steps.push(step);
    }

    /// Trailing `k` (step, estimate) pairs.
    fn tail(&self, k: usize) -> (&[f64], &[f64]) {
        let start = self.steps.len() - k;
        (&self.steps[start..], &self.estimates[start..])
    }

    /// Extrapolate the trailing `k` estimates to zero step size.
    pub fn extrapolate(&self, k: usize) -> NumericResult<Extrapolation> {
        if k == 0 || k > self.len() {
            return Err(NumericError::invalid(
                "k",
                format!("need 1..={} points, got {}", self.len(), k),
            ));
        }
        let (steps, estimates) = self.tail(k);
        neville_extrapolate(steps, estimates, 0.0)
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    /// Trapezoidal estimates so far, coarsest first.
    pub fn estimates(&self) -> &[f64] {
        &self.estimates
    }

    /// Relative step sizes so far: 1, 1/4, 1/16, ...
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }
}

/// Romberg integrator with fixed configuration.
///
/// Holds no per-integration state, so one integrator can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RombergIntegrator {
    config: RombergConfig,
}

impl RombergIntegrator {
    /// Build an integrator, validating the configuration.
    pub fn new(config: RombergConfig) -> NumericResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RombergConfig {
        &self.config
    }

    /// Integrate `f` from `a` to `b`.
    ///
    /// `a > b` yields the negated integral; `a == b` returns 0 without
    /// iterating. Exhausting the iteration budget returns
    /// [`NumericError::DidNotConverge`] carrying the best estimate.
    ///
    /// Convergence is first tested once `k` estimates exist, so no result
    /// reports fewer than `k` iterations. Integrands the trapezoid rule
    /// handles exactly (constants, straight lines) converge at exactly
    /// iteration `k`: five with the default configuration, two with
    /// `k = 2`. A correction of exactly zero counts as converged, so an
    /// integral of zero is reachable.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shannon_numerics::RombergIntegrator;
    ///
    /// let integrator = RombergIntegrator::default();
    /// let result = integrator.integrate(&|x: f64| x * x, 0.0, 1.0).unwrap();
    /// assert!((result.value - 1.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn integrate<F>(&self, f: &F, a: f64, b: f64) -> NumericResult<Convergence>
    where
        F: Evaluable + ?Sized,
    {
        if !(a.is_finite() && b.is_finite()) {
            return Err(NumericError::invalid(
                "a/b",
                format!("bounds must be finite, got [{}, {}]", a, b),
            ));
        }

        if a == b {
            return Ok(Convergence {
                value: 0.0,
                error_estimate: 0.0,
                iterations: 0,
            });
        }

        let RombergConfig {
            max_iterations,
            extrapolation_points: k,
            tolerance,
        } = self.config;

        let mut refiner = TrapezoidRefiner::new();
        let mut state = IntegrationState::with_capacity(max_iterations);
        let mut best = f64::NAN;
        let mut best_error = f64::INFINITY;

        for j in 1..=max_iterations {
            let estimate = refiner.refine(f, a, b, j)?;
            state.push(estimate);
            best = estimate;
            trace!(iteration = j, estimate, "trapezoid refinement");

            if j >= k {
                let extrapolation = state.extrapolate(k)?;
                best = extrapolation.value;
                best_error = extrapolation.error.abs();

                if best_error <= tolerance * extrapolation.value.abs() {
                    debug!(
                        iterations = j,
                        value = extrapolation.value,
                        error = best_error,
                        "romberg converged"
                    );
                    return Ok(Convergence {
                        value: extrapolation.value,
                        error_estimate: best_error,
                        iterations: j,
                    });
                }
            }
        }

        warn!(
            a,
            b,
            max_iterations,
            estimate = best,
            error = best_error,
            "romberg integration exhausted its iteration budget"
        );
        Err(NumericError::DidNotConverge {
            context: "romberg",
            iterations: max_iterations,
            tolerance,
            estimate: best,
            error_estimate: best_error,
        })
    }
}

/// Integrate `f` from `a` to `b` with the default configuration
/// (`jmax = 20`, `k = 5`, `eps = 1e-12`).
pub fn romberg<F>(f: &F, a: f64, b: f64) -> NumericResult<f64>
where
    F: Evaluable + ?Sized,
{
    RombergIntegrator::default()
        .integrate(f, a, b)
        .map(|result| result.value)
}
