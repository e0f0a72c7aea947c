//! Configuration and result types shared across the kernel.
//!
//! Configuration is immutable for the duration of a call. Every struct
//! deserializes with missing fields filled from its `Default`.

use serde::{Deserialize, Serialize};

use crate::adaptive::newton_tolerance;
use crate::error::{NumericError, NumericResult};

/// Largest `max_iterations` a Romberg run may request.
///
/// Stage `j` adds `2^(j-2)` points; 30 keeps the point counter and the work
/// per call bounded.
pub const MAX_ROMBERG_ITERATIONS: usize = 30;

/// Tunables for Romberg integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RombergConfig {
    /// Maximum trapezoid refinements (`jmax`).
    pub max_iterations: usize,
    /// Number of trailing estimates fed to the extrapolator (`k`).
    /// `k = 2` is Simpson's rule. Convergence is tested from iteration `k`
    /// on, so even a constant integrand takes `k` iterations.
    pub extrapolation_points: usize,
    /// Relative tolerance on the extrapolation error estimate (`eps`).
    pub tolerance: f64,
}

impl Default for RombergConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            extrapolation_points: 5,
            tolerance: 1e-12,
        }
    }
}

impl RombergConfig {
    /// Check the configuration before any iteration runs.
    pub fn validate(&self) -> NumericResult<()> {
        if self.extrapolation_points == 0 {
            return Err(NumericError::invalid(
                "extrapolation_points",
                "must be at least 1",
            ));
        }
        if self.max_iterations < self.extrapolation_points {
            return Err(NumericError::invalid(
                "max_iterations",
                format!(
                    "{} iterations can never fill {} extrapolation points",
                    self.max_iterations, self.extrapolation_points
                ),
            ));
        }
        if self.max_iterations > MAX_ROMBERG_ITERATIONS {
            return Err(NumericError::invalid(
                "max_iterations",
                format!("must not exceed {}", MAX_ROMBERG_ITERATIONS),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(NumericError::invalid(
                "tolerance",
                format!("must be finite and positive, got {}", self.tolerance),
            ));
        }
        Ok(())
    }
}

/// Tunables for the Newton-Raphson solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonConfig {
    /// Absolute bound on the final Newton step.
    pub tolerance: f64,
    /// Iteration cap; exhausting it yields `DidNotConverge`.
    pub max_iterations: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            tolerance: newton_tolerance(),
            max_iterations: 200,
        }
    }
}

impl NewtonConfig {
    pub fn validate(&self) -> NumericResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(NumericError::invalid(
                "tolerance",
                format!("must be finite and positive, got {}", self.tolerance),
            ));
        }
        if self.max_iterations == 0 {
            return Err(NumericError::invalid("max_iterations", "must be at least 1"));
        }
        Ok(())
    }
}

/// Tunables for the confidence-level search behind effective Shannon
/// probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Upper bound of the search, in standard deviations of the
    /// measurement error.
    pub sigma_limit: f64,
    /// Bisection steps; 64 exhausts f64 resolution on `[0, sigma_limit]`.
    pub max_bisections: usize,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            sigma_limit: 3.0,
            max_bisections: 64,
        }
    }
}

impl ConfidenceConfig {
    pub fn validate(&self) -> NumericResult<()> {
        if !(self.sigma_limit.is_finite() && self.sigma_limit > 0.0) {
            return Err(NumericError::invalid(
                "sigma_limit",
                format!("must be finite and positive, got {}", self.sigma_limit),
            ));
        }
        if self.max_bisections == 0 {
            return Err(NumericError::invalid("max_bisections", "must be at least 1"));
        }
        Ok(())
    }
}

/// A converged value with its error estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Convergence {
    /// Converged value.
    pub value: f64,
    /// Magnitude of the last correction applied.
    pub error_estimate: f64,
    /// Iterations used (zero for short-circuited cases).
    pub iterations: usize,
}

/// Result of Neville extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrapolation {
    /// Extrapolated value at the target abscissa.
    pub value: f64,
    /// Last correction added; the error indication.
    pub error: f64,
}

/// Shannon probability compensated for the size of the data set it was
/// measured on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveShannon {
    /// Uncompensated Shannon probability, P.
    pub probability: f64,
    /// Confidence level that the measurement error is below `error_level`.
    pub confidence: f64,
    /// P times the confidence level.
    pub effective_probability: f64,
    /// Measurement error level, e.
    pub error_level: f64,
    /// Error level in standard deviations of the measurement error.
    pub sigma: f64,
}

impl EffectiveShannon {
    /// Optimal wagering fraction, `2 * Peff - 1`.
    pub fn wager_fraction(&self) -> f64 {
        2.0 * self.effective_probability - 1.0
    }
}
